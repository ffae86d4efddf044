use std::sync::Arc;

use blockseat_catalog::CountryDirectory;
use blockseat_core::{
    BlockSeatRepository, BookingRepository, BookingService, InventoryService, NoTokenSource, TokenSource,
    VisaRepository, VisaService,
};
use blockseat_order::{DocumentRenderer, JsonRenderer};
use blockseat_store::{
    BackendClient, Config, FileTokenStore, HttpBlockSeatRepository, HttpBookingRepository, HttpVisaRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub inventory: InventoryService,
    pub bookings: BookingService,
    pub visas: VisaService,
    pub countries: Arc<CountryDirectory>,
    pub token_source: Arc<dyn TokenSource>,
}

impl AppState {
    pub fn new(
        block_seats: Arc<dyn BlockSeatRepository>,
        bookings: Arc<dyn BookingRepository>,
        visas: Arc<dyn VisaRepository>,
        renderer: Arc<dyn DocumentRenderer>,
        countries: CountryDirectory,
        token_source: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            inventory: InventoryService::new(block_seats),
            bookings: BookingService::new(bookings, renderer),
            visas: VisaService::new(visas),
            countries: Arc::new(countries),
            token_source,
        }
    }

    /// Wire the HTTP repositories against the configured backends.
    pub fn from_config(config: &Config) -> Self {
        let flight = BackendClient::new(config.backend.flight_url.clone());
        let backend = BackendClient::new(config.backend.backend_url.clone());

        let token_source: Arc<dyn TokenSource> = match &config.auth.token_store_path {
            Some(path) => Arc::new(FileTokenStore::new(path)),
            None => Arc::new(NoTokenSource),
        };

        Self::new(
            Arc::new(HttpBlockSeatRepository::new(flight)),
            Arc::new(HttpBookingRepository::new(backend.clone())),
            Arc::new(HttpVisaRepository::new(backend)),
            Arc::new(JsonRenderer),
            CountryDirectory::new(config.countries.clone()),
            token_source,
        )
    }
}
