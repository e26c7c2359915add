// Application layer - Use case interactors

pub mod batch;
pub mod container;
pub mod encode_interactor;
pub mod inspect_interactor;
pub mod rename_interactor;

// Re-export interactors
pub use batch::{BatchReport, FileFailure};
pub use encode_interactor::EncodeInteractor;
pub use inspect_interactor::InspectInteractor;
pub use rename_interactor::RenameInteractor;
