//! ST7789 panel driver with two DMA-flushed framebuffers.
//!
//! [`St7789Renderer`] draws into one framebuffer while [`St7789Flusher`]
//! streams the other to the panel, so the foreground tick never waits for
//! the SPI transfer of the frame it just finished.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Async, Spi};
use embassy_time::Timer;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use tripcomp_common::layout::{SCREEN_HEIGHT, SCREEN_WIDTH};

const WIDTH: usize = SCREEN_WIDTH as usize;
const HEIGHT: usize = SCREEN_HEIGHT as usize;
const BYTES_PER_PIXEL: usize = 2;
const ROW_BYTES: usize = WIDTH * BYTES_PER_PIXEL;
const BUFFER_SIZE: usize = ROW_BYTES * HEIGHT;

static mut FRAMEBUFFERS: [[u8; BUFFER_SIZE]; 2] = [[0u8; BUFFER_SIZE]; 2];

// ST7789 commands
const SWRESET: u8 = 0x01;
const SLPOUT: u8 = 0x11;
const NORON: u8 = 0x13;
const INVON: u8 = 0x21;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;

/// Landscape: row/column exchange plus X mirror.
const MADCTL_LANDSCAPE: u8 = 0x20 | 0x40;
/// 16 bits per pixel.
const COLMOD_RGB565: u8 = 0x55;

/// Owner of the two static framebuffers.
pub struct FrameBuffers {
    render_idx: usize,
}

impl FrameBuffers {
    /// # Safety
    /// At most one instance may exist; it hands out references into the
    /// static framebuffers.
    pub unsafe fn take() -> Self { Self { render_idx: 0 } }

    /// Buffer the next frame is drawn into.
    ///
    /// # Safety
    /// The flusher must not be reading this buffer.
    pub unsafe fn render_buffer(&mut self) -> &'static mut [u8] {
        unsafe { &mut (*core::ptr::addr_of_mut!(FRAMEBUFFERS))[self.render_idx] }
    }

    /// Buffer `idx` for the flusher.
    ///
    /// # Safety
    /// The renderer must not be writing this buffer.
    pub unsafe fn flush_buffer(idx: usize) -> &'static [u8] {
        unsafe { &(*core::ptr::addr_of!(FRAMEBUFFERS))[idx & 1] }
    }

    /// Hand the rendered buffer over for flushing and render into the other.
    ///
    /// Returns the index of the completed buffer.
    pub fn swap(&mut self) -> usize {
        let completed = self.render_idx;
        self.render_idx ^= 1;
        completed
    }
}

/// SPI side of the panel.
pub struct St7789Flusher<'d> {
    spi: Spi<'d, SPI0, Async>,
    dc: Output<'d>,
    cs: Output<'d>,
}

impl<'d> St7789Flusher<'d> {
    pub fn new(
        spi: Spi<'d, SPI0, Async>,
        dc: Output<'d>,
        cs: Output<'d>,
    ) -> Self {
        Self { spi, dc, cs }
    }

    /// Run the power-up sequence and open a full-screen write window.
    pub async fn init(&mut self) {
        self.command(SWRESET, &[]).await;
        Timer::after_millis(150).await;

        self.command(SLPOUT, &[]).await;
        Timer::after_millis(10).await;

        self.command(COLMOD, &[COLMOD_RGB565]).await;
        self.command(MADCTL, &[MADCTL_LANDSCAPE]).await;

        // PIM715 panel needs inversion for correct colours
        self.command(INVON, &[]).await;
        self.command(NORON, &[]).await;
        self.command(DISPON, &[]).await;
        Timer::after_millis(10).await;

        let [x_hi, x_lo] = (WIDTH as u16 - 1).to_be_bytes();
        let [y_hi, y_lo] = (HEIGHT as u16 - 1).to_be_bytes();
        self.command(CASET, &[0, 0, x_hi, x_lo]).await;
        self.command(RASET, &[0, 0, y_hi, y_lo]).await;
    }

    /// Command byte followed by optional parameter bytes under one CS.
    async fn command(
        &mut self,
        cmd: u8,
        params: &[u8],
    ) {
        self.cs.set_low();
        self.dc.set_low();
        self.spi.write(&[cmd]).await.ok();
        if !params.is_empty() {
            self.dc.set_high();
            self.spi.write(params).await.ok();
        }
        self.cs.set_high();
    }

    /// Stream a full frame over DMA.
    pub async fn flush(
        &mut self,
        frame: &[u8],
    ) {
        self.cs.set_low();
        self.dc.set_low();
        self.spi.blocking_write(&[RAMWR]).ok();
        self.dc.set_high();
        self.spi.write(frame).await.ok();
        self.cs.set_high();
    }
}

/// `DrawTarget` over one framebuffer (big-endian RGB565).
pub struct St7789Renderer<'a> {
    frame: &'a mut [u8],
}

impl<'a> St7789Renderer<'a> {
    pub fn new(frame: &'a mut [u8]) -> Self { Self { frame } }

    #[inline]
    fn pixel_bytes(color: Rgb565) -> [u8; 2] { RawU16::from(color).into_inner().to_be_bytes() }

    fn fill_span(
        &mut self,
        y: u32,
        x: u32,
        width: u32,
        bytes: [u8; 2],
    ) {
        let start = y as usize * ROW_BYTES + x as usize * BYTES_PER_PIXEL;
        let end = start + width as usize * BYTES_PER_PIXEL;
        for px in self.frame[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&bytes);
        }
    }
}

impl OriginDimensions for St7789Renderer<'_> {
    fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
}

impl DrawTarget for St7789Renderer<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x < WIDTH && y < HEIGHT {
                let idx = y * ROW_BYTES + x * BYTES_PER_PIXEL;
                self.frame[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&Self::pixel_bytes(color));
            }
        }
        Ok(())
    }

    fn fill_solid(
        &mut self,
        area: &Rectangle,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size == Size::zero() {
            return Ok(());
        }

        let bytes = Self::pixel_bytes(color);
        let x = area.top_left.x as u32;
        for y in area.rows() {
            self.fill_span(y as u32, x, area.size.width, bytes);
        }
        Ok(())
    }

    fn clear(
        &mut self,
        color: Self::Color,
    ) -> Result<(), Self::Error> {
        let bytes = Self::pixel_bytes(color);
        for px in self.frame.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&bytes);
        }
        Ok(())
    }
}
