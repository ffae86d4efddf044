pub mod bookings;
pub mod identity;
pub mod inventory;
pub mod memory;
pub mod repository;
pub mod visa;

use blockseat_catalog::AssembleError;
use blockseat_order::{RenderError, StatusError, VoucherError};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Authentication token not found. Please log in again.")]
    MissingCredential,

    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Could not reach backend: {0}")]
    Transport(String),

    #[error("Unexpected backend response: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Assemble(#[from] AssembleError),

    #[error(transparent)]
    Status(#[from] StatusError),

    #[error(transparent)]
    Voucher(#[from] VoucherError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Internal service error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

pub use bookings::BookingService;
pub use identity::{resolve_token, AuthToken, NoTokenSource, StaticTokenSource, TokenSource};
pub use inventory::{InventoryService, SaveOutcome};
pub use repository::{BlockSeatRepository, BookingRepository, VisaRepository};
pub use visa::VisaService;
