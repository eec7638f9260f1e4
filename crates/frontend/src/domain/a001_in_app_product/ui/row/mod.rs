mod logo;
mod state;
mod view;

pub use logo::{LogoEditor, LogoInput};
pub use state::{ProductRowState, RowInitError, SaveOutcome};
pub use view::ProductRow;
