pub mod assembler;
pub mod builder;
pub mod country;
pub mod dates;
pub mod form;
pub mod inventory;
pub mod pricing;
pub mod stoppage;
pub mod validation;

pub use assembler::{assemble, diff, prepare_submission, AssembleError, Submission};
pub use builder::{BuilderError, BuilderState, DateEntryBuilder, DraftAction, Leg, ToggleOutcome};
pub use country::{CountryDirectory, CountryEntry, CountryGrouping};
pub use dates::{FlightDateEntry, InventoryDraft, LayoverDuration, StoppageLeg};
pub use form::{FormAction, FormError, InventoryForm};
pub use inventory::{Airline, BlockSeatPayload, BlockSeatRecord, InventoryStatus, Route, TripType};
pub use pricing::{Baggage, CabinClass, ClassConfig, Commission, CommissionKind, Fare, FareRules, PricingError};
pub use stoppage::{derive_stops, resize_stops, StopSettings};
pub use validation::{can_save, check_entry, ValidationError};
