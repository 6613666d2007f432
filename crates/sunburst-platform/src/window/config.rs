use crate::device::GpuInit;
use crate::logging::LoggingConfig;

/// Platform configuration.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Title used when `init_window` is given none.
    pub default_title: String,

    pub resizable: bool,
    pub closable: bool,
    pub minimizable: bool,

    pub gpu: GpuInit,
    pub logging: LoggingConfig,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            default_title: "Window".to_string(),
            resizable: true,
            closable: true,
            minimizable: true,
            gpu: GpuInit::default(),
            logging: LoggingConfig::default(),
        }
    }
}
