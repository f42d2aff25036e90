//! SPI setup for the Pimoroni PIM715 Display Pack 2.8" (ST7789).
//!
//! DC on GPIO16, CS on GPIO17, SPI0 clock and MOSI on GPIO18/19, backlight
//! on GPIO20. The panel reset is tied to RUN.

use embassy_rp::spi::Config as SpiConfig;

/// ST7789 datasheet maximum.
const DISPLAY_SPI_HZ: u32 = 62_500_000;

pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = DISPLAY_SPI_HZ;
    config
}
