//! Builder for small GeoTIFF files used as test fixtures.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tiff::encoder::{TiffEncoder, colortype};
use tiff::tags::Tag;

use crate::crs::Crs;
use crate::error::RasterError;
use crate::transform::GeoTransform;

#[derive(Debug, Clone)]
enum Pixels {
    U8(Vec<u8>),
    F32(Vec<f32>),
}

/// In-memory description of a single-band north-up GeoTIFF.
#[derive(Debug, Clone)]
pub struct GeoTiffFixture {
    width: u32,
    height: u32,
    pixels: Pixels,
    transform: GeoTransform,
    crs: Crs,
    nodata: Option<String>,
    pixel_is_point: bool,
    tiles: Option<(u32, u32)>,
}

impl GeoTiffFixture {
    /// Float raster, row-major, `data.len() == width * height`.
    pub fn f32(width: u32, height: u32, data: Vec<f32>, transform: GeoTransform) -> Self {
        assert_eq!(data.len(), (width * height) as usize, "pixel count mismatch");
        Self {
            width,
            height,
            pixels: Pixels::F32(data),
            transform,
            crs: Crs::Wgs84,
            nodata: None,
            pixel_is_point: false,
            tiles: None,
        }
    }

    /// Byte raster, row-major, `data.len() == width * height`.
    pub fn u8(width: u32, height: u32, data: Vec<u8>, transform: GeoTransform) -> Self {
        assert_eq!(data.len(), (width * height) as usize, "pixel count mismatch");
        Self {
            width,
            height,
            pixels: Pixels::U8(data),
            transform,
            crs: Crs::Wgs84,
            nodata: None,
            pixel_is_point: false,
            tiles: None,
        }
    }

    /// Sets the CRS recorded in the GeoKey directory.
    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = crs;
        self
    }

    /// Sets the GDAL no-data tag.
    pub fn with_nodata(mut self, nodata: &str) -> Self {
        self.nodata = Some(nodata.to_string());
        self
    }

    /// Marks tie points as referring to pixel centres.
    pub fn with_pixel_is_point(mut self) -> Self {
        self.pixel_is_point = true;
        self
    }

    /// Stores the image in `tile_width x tile_height` tiles instead of
    /// strips. Edge tiles are zero-padded.
    pub fn with_tiles(mut self, tile_width: u32, tile_height: u32) -> Self {
        self.tiles = Some((tile_width, tile_height));
        self
    }

    fn geokeys(&self) -> Vec<u16> {
        let (model, crs_key) = match self.crs {
            Crs::Wgs84 => (2u16, 2048u16),
            Crs::EtrsLaea => (1u16, 3072u16),
        };
        let raster_type = if self.pixel_is_point { 2 } else { 1 };
        vec![
            1, 1, 0, 3, //
            1024, 0, 1, model, //
            1025, 0, 1, raster_type, //
            crs_key, 0, 1, self.crs.epsg() as u16,
        ]
    }

    /// Writes the fixture to `path`.
    pub fn write(&self, path: &Path) -> Result<(), RasterError> {
        let gt = if self.pixel_is_point {
            GeoTransform::new(
                self.transform.origin_x() + self.transform.pixel_width() / 2.0,
                self.transform.origin_y() + self.transform.pixel_height() / 2.0,
                self.transform.pixel_width(),
                self.transform.pixel_height(),
            )
        } else {
            self.transform
        };
        let scale = [gt.pixel_width(), -gt.pixel_height(), 0.0];
        let tiepoint = [0.0, 0.0, 0.0, gt.origin_x(), gt.origin_y(), 0.0];
        let geokeys = self.geokeys();

        if let Some((tile_width, tile_height)) = self.tiles {
            let bytes = self.tiled_bytes(tile_width, tile_height, &scale, &tiepoint, &geokeys);
            std::fs::write(path, bytes)?;
            return Ok(());
        }

        let mut encoder = TiffEncoder::new(BufWriter::new(File::create(path)?))?;

        macro_rules! write_image {
            ($color:ty, $data:expr) => {{
                let mut image = encoder.new_image::<$color>(self.width, self.height)?;
                let dir = image.encoder();
                dir.write_tag(Tag::ModelPixelScaleTag, &scale[..])?;
                dir.write_tag(Tag::ModelTiepointTag, &tiepoint[..])?;
                dir.write_tag(Tag::GeoKeyDirectoryTag, &geokeys[..])?;
                if let Some(nd) = &self.nodata {
                    dir.write_tag(Tag::GdalNodata, nd.as_str())?;
                }
                image.write_data($data)?;
            }};
        }

        match &self.pixels {
            Pixels::U8(data) => write_image!(colortype::Gray8, data),
            Pixels::F32(data) => write_image!(colortype::Gray32Float, data),
        }
        Ok(())
    }

    /// Little-endian pixel bytes and `(BitsPerSample, SampleFormat)`.
    fn sample(&self, index: Option<usize>) -> (Vec<u8>, u16, u16) {
        match &self.pixels {
            Pixels::U8(data) => (vec![index.map_or(0, |i| data[i])], 8, 1),
            Pixels::F32(data) => (
                index.map_or(0.0, |i| data[i]).to_le_bytes().to_vec(),
                32,
                3,
            ),
        }
    }

    /// Serialises an uncompressed tiled TIFF by hand; the `tiff` encoder
    /// writes strips only.
    fn tiled_bytes(
        &self,
        tile_width: u32,
        tile_height: u32,
        scale: &[f64],
        tiepoint: &[f64],
        geokeys: &[u16],
    ) -> Vec<u8> {
        const SHORT: u16 = 3;
        const LONG: u16 = 4;
        const ASCII: u16 = 2;
        const DOUBLE: u16 = 12;

        let (_, bits, format) = self.sample(None);
        let across = self.width.div_ceil(tile_width);
        let down = self.height.div_ceil(tile_height);

        let mut out = b"II".to_vec();
        out.extend(42u16.to_le_bytes());
        out.extend(0u32.to_le_bytes());

        let mut offsets = Vec::new();
        let mut counts = Vec::new();
        for ty in 0..down {
            for tx in 0..across {
                let start = out.len();
                for lr in 0..tile_height {
                    for lc in 0..tile_width {
                        let (c, r) = (tx * tile_width + lc, ty * tile_height + lr);
                        let index = (c < self.width && r < self.height)
                            .then(|| (r * self.width + c) as usize);
                        out.extend(self.sample(index).0);
                    }
                }
                offsets.push(start as u32);
                counts.push((out.len() - start) as u32);
            }
        }

        fn shorts(v: &[u16]) -> Vec<u8> {
            v.iter().flat_map(|x| x.to_le_bytes()).collect()
        }
        fn longs(v: &[u32]) -> Vec<u8> {
            v.iter().flat_map(|x| x.to_le_bytes()).collect()
        }
        fn doubles(v: &[f64]) -> Vec<u8> {
            v.iter().flat_map(|x| x.to_le_bytes()).collect()
        }

        // (tag, type, count, payload), sorted by tag.
        let mut entries: Vec<(u16, u16, u32, Vec<u8>)> = vec![
            (256, LONG, 1, longs(&[self.width])),
            (257, LONG, 1, longs(&[self.height])),
            (258, SHORT, 1, shorts(&[bits])),
            (259, SHORT, 1, shorts(&[1])),
            (262, SHORT, 1, shorts(&[1])),
            (277, SHORT, 1, shorts(&[1])),
            (322, LONG, 1, longs(&[tile_width])),
            (323, LONG, 1, longs(&[tile_height])),
            (324, LONG, offsets.len() as u32, longs(&offsets[..])),
            (325, LONG, counts.len() as u32, longs(&counts[..])),
            (339, SHORT, 1, shorts(&[format])),
            (33550, DOUBLE, scale.len() as u32, doubles(scale)),
            (33922, DOUBLE, tiepoint.len() as u32, doubles(tiepoint)),
            (34735, SHORT, geokeys.len() as u32, shorts(geokeys)),
        ];
        if let Some(nd) = &self.nodata {
            let mut text = nd.as_bytes().to_vec();
            text.push(0);
            entries.push((42113, ASCII, text.len() as u32, text));
        }

        // Payloads over four bytes live outside the IFD.
        let mut fields = Vec::with_capacity(entries.len());
        for (tag, kind, count, payload) in entries {
            let inline = if payload.len() <= 4 {
                let mut word = payload;
                word.resize(4, 0);
                word
            } else {
                if out.len() % 2 == 1 {
                    out.push(0);
                }
                let at = out.len() as u32;
                out.extend(payload);
                at.to_le_bytes().to_vec()
            };
            fields.push((tag, kind, count, inline));
        }

        if out.len() % 2 == 1 {
            out.push(0);
        }
        let ifd = out.len() as u32;
        out[4..8].copy_from_slice(&ifd.to_le_bytes());
        out.extend((fields.len() as u16).to_le_bytes());
        for (tag, kind, count, inline) in fields {
            out.extend(tag.to_le_bytes());
            out.extend(kind.to_le_bytes());
            out.extend(count.to_le_bytes());
            out.extend(inline);
        }
        out.extend(0u32.to_le_bytes());
        out
    }
}
