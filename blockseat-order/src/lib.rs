pub mod filter;
pub mod models;
pub mod render;
pub mod status;
pub mod voucher;

pub use filter::{BookingFilter, VisaFilter};
pub use models::{
    AgencyRef, Booking, BookingKind, BookingPricing, BookingStatus, ContactInfo, FlightSummary, PackageSummary,
    PassengerType, Traveler, VisaAppointment, VisaStatus,
};
pub use render::{DocumentRenderer, JsonRenderer, RenderError, RenderedDocument};
pub use status::StatusError;
pub use voucher::{
    DocumentGenerator, DocumentKind, DocumentTraveler, ItineraryLine, LineItem, VoucherDocument, VoucherError,
};
