use crate::core::driver::DriverConfig;

#[derive(Clone)]
pub struct AppState {
    pub driver_config: DriverConfig,
}

impl AppState {
    pub fn new(driver_config: DriverConfig) -> Self {
        Self { driver_config }
    }
}
