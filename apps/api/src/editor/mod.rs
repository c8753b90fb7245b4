// Resume editor: server-held working copies, section editing, live preview,
// and the save/reload/export controls.

pub mod address;
pub mod form;
pub mod handlers;
pub mod sections;
pub mod session;
