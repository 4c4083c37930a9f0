// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns fields into pictures.  Nothing in here knows how a field was
//! computed, and nothing in the generators knows about pixels.
//!
//! Orientation is the same for stills and animation frames: the real
//! axis runs left to right across the image, and the imaginary axis
//! runs bottom to top, so pixel `(x, y)` shows field cell
//! `[x, density - 1 - y]`.

use image::gif::Encoder;
use image::png::PNGEncoder;
use image::{ColorType, Frame, ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
use num::rational::Ratio;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use errors::RenderError;
use field::Field;

/// Anchor colors of the viridis palette, evenly spaced from low to
/// high.
const VIRIDIS: [[u8; 3]; 9] = [
    [68, 1, 84],
    [71, 44, 122],
    [59, 81, 139],
    [44, 113, 142],
    [33, 144, 141],
    [39, 173, 129],
    [92, 200, 99],
    [170, 220, 50],
    [253, 231, 37],
];

/// A piecewise linear color ramp.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMap {
    anchors: Vec<[u8; 3]>,
}

impl ColorMap {
    /// A ramp through the given anchors.  Needs at least one.
    pub fn new(anchors: Vec<[u8; 3]>) -> Option<ColorMap> {
        if anchors.is_empty() {
            None
        } else {
            Some(ColorMap { anchors })
        }
    }

    /// Dark purple through teal to yellow.
    pub fn viridis() -> ColorMap {
        ColorMap {
            anchors: VIRIDIS.to_vec(),
        }
    }

    /// Black to white.
    pub fn grayscale() -> ColorMap {
        ColorMap {
            anchors: vec![[0, 0, 0], [255, 255, 255]],
        }
    }

    /// The color at `t`, clamped to [0, 1].
    pub fn color(&self, t: f64) -> Rgb<u8> {
        let t = if t.is_nan() { 0.0 } else { t.max(0.0).min(1.0) };
        let last = self.anchors.len() - 1;
        if last == 0 {
            return Rgb(self.anchors[0]);
        }
        let position = t * (last as f64);
        let lower = (position.floor() as usize).min(last - 1);
        let fraction = position - (lower as f64);
        let (a, b) = (self.anchors[lower], self.anchors[lower + 1]);
        let mix = |i: usize| {
            let v = f64::from(a[i]) + (f64::from(b[i]) - f64::from(a[i])) * fraction;
            v.round() as u8
        };
        Rgb([mix(0), mix(1), mix(2)])
    }

    /// The color of `count` when the field spans `[lo, hi]`.  A flat
    /// field has nothing to stretch and gets the low end.
    pub fn color_of(&self, count: u32, lo: u32, hi: u32) -> Rgb<u8> {
        if hi <= lo {
            return self.color(0.0);
        }
        self.color(f64::from(count.saturating_sub(lo)) / f64::from(hi - lo))
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        ColorMap::viridis()
    }
}

/// Paints a field, stretching its own range of counts across the
/// whole color map.
pub fn field_to_image(field: &Field, colors: &ColorMap) -> RgbImage {
    let side = field.density() as u32;
    let (lo, hi) = field.bounds();
    ImageBuffer::from_fn(side, side, |x, y| {
        colors.color_of(field.get(x as usize, (side - 1 - y) as usize), lo, hi)
    })
}

fn field_to_rgba(field: &Field, colors: &ColorMap) -> RgbaImage {
    let rgb = field_to_image(field, colors);
    ImageBuffer::from_fn(rgb.width(), rgb.height(), |x, y| {
        let Rgb([r, g, b]) = *rgb.get_pixel(x, y);
        Rgba([r, g, b, 255])
    })
}

/// Writes a field out as a PNG.  The file is flushed before this
/// returns, so a full disk shows up as an error here.
pub fn write_png<P: AsRef<Path>>(
    path: P,
    field: &Field,
    colors: &ColorMap,
) -> Result<(), RenderError> {
    let image = field_to_image(field, colors);
    let mut output = BufWriter::new(File::create(path.as_ref())?);
    PNGEncoder::new(&mut output).encode(
        &image,
        image.width(),
        image.height(),
        ColorType::RGB(8),
    )?;
    output.flush()?;
    info!(
        "Wrote {}x{} still to {}",
        field.density(),
        field.density(),
        path.as_ref().display()
    );
    Ok(())
}

/// GIF delays are in hundredths of a second; rounds to the nearest
/// one, but never to zero.
fn gif_delay(interval_ms: u32) -> Ratio<u16> {
    let centis = (interval_ms.saturating_add(5) / 10).max(1).min(u32::from(u16::max_value()));
    Ratio::from_integer(centis as u16)
}

/// Owns the GIF encoder for one animation.  Built once over a
/// borrowed output, then fed fields in order.  `finish` closes the
/// GIF stream; flushing the output is left to its owner, which gets
/// it back once the writer is gone.
pub struct AnimationWriter<'w, W: Write + 'w> {
    encoder: Encoder<&'w mut W>,
    delay: Ratio<u16>,
    colors: ColorMap,
    frames: usize,
}

impl<'w, W: Write + 'w> AnimationWriter<'w, W> {
    /// Wraps any writer.  `interval_ms` is the pause between frames.
    pub fn new(output: &'w mut W, interval_ms: u32, colors: ColorMap) -> Self {
        AnimationWriter {
            encoder: Encoder::new(output),
            delay: gif_delay(interval_ms),
            colors,
            frames: 0,
        }
    }

    /// Appends one frame.
    pub fn push(&mut self, field: &Field) -> Result<(), RenderError> {
        let frame = Frame::from_parts(field_to_rgba(field, &self.colors), 0, 0, self.delay);
        self.encoder.encode_frames(Some(frame))?;
        self.frames += 1;
        debug!(
            "Encoded frame {} (threshold {})",
            self.frames,
            field.threshold()
        );
        Ok(())
    }

    /// Frames written so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Writes the GIF trailer and returns the number of frames.
    pub fn finish(self) -> usize {
        // Dropping the encoder is what writes the trailer.
        self.frames
    }
}

/// Streams a sequence of fields into an animated GIF and returns how
/// many frames were written.  Fields are encoded as they arrive, so a
/// lazy sequence is never held in memory all at once.
pub fn write_gif<P, I>(
    path: P,
    fields: I,
    interval_ms: u32,
    colors: ColorMap,
) -> Result<usize, RenderError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = Field>,
{
    let mut output = BufWriter::new(File::create(path.as_ref())?);
    let frames = {
        let mut writer = AnimationWriter::new(&mut output, interval_ms, colors);
        for field in fields {
            writer.push(&field)?;
        }
        writer.finish()
    };
    output.flush()?;
    info!(
        "Wrote {} frame animation to {}",
        frames,
        path.as_ref().display()
    );
    Ok(frames)
}
