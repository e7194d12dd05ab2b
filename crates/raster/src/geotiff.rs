//! Lazily decoded single-band GeoTIFF rasters.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::debug;

use crate::crs::Crs;
use crate::error::RasterError;
use crate::location::Location;
use crate::transform::GeoTransform;

// GeoKey identifiers.
const GT_MODEL_TYPE: u32 = 1024;
const GT_RASTER_TYPE: u32 = 1025;
const GEOGRAPHIC_TYPE: u32 = 2048;
const PROJECTED_CS_TYPE: u32 = 3072;

const MODEL_TYPE_PROJECTED: u32 = 1;
const RASTER_PIXEL_IS_POINT: u32 = 2;
const USER_DEFINED: u32 = 32767;

/// Storage layout of the image chunks.
#[derive(Debug, Clone, Copy)]
enum ChunkLayout {
    Stripped {
        rows_per_strip: u32,
    },
    Tiled {
        tile_width: u32,
        tile_height: u32,
        tiles_per_row: u32,
    },
}

impl ChunkLayout {
    /// Returns `(chunk_index, local_col, local_row)` for a pixel.
    fn locate(self, col: u32, row: u32) -> (u32, u32, u32) {
        match self {
            ChunkLayout::Stripped { rows_per_strip } => {
                (row / rows_per_strip, col, row % rows_per_strip)
            }
            ChunkLayout::Tiled {
                tile_width,
                tile_height,
                tiles_per_row,
            } => {
                let chunk = (row / tile_height) * tiles_per_row + col / tile_width;
                (chunk, col % tile_width, row % tile_height)
            }
        }
    }
}

/// A single-band georeferenced raster opened for point sampling.
///
/// Chunks are decoded on first access and cached, so repeated samples from
/// the same neighbourhood pay the decoding cost once.
pub struct Raster {
    path: PathBuf,
    decoder: Decoder<BufReader<File>>,
    width: u32,
    height: u32,
    layout: ChunkLayout,
    transform: GeoTransform,
    crs: Crs,
    nodata: Option<f64>,
    cache: HashMap<u32, Vec<f64>>,
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("path", &self.path)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("crs", &self.crs)
            .field("nodata", &self.nodata)
            .finish_non_exhaustive()
    }
}

impl Raster {
    /// Opens a GeoTIFF and reads its georeferencing.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::FileNotFound`] if the path does not exist,
    /// [`RasterError::MissingGeoreference`] if no transform tags are present,
    /// [`RasterError::UnsupportedCrs`] for projected systems other than
    /// EPSG:3035, and [`RasterError::UnsupportedSampleType`] for multi-band
    /// images.
    pub fn open(path: &Path) -> Result<Self, RasterError> {
        if !path.exists() {
            return Err(RasterError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let reader = BufReader::new(File::open(path)?);
        let mut decoder = Decoder::new(reader)?;

        match decoder.colortype()? {
            ColorType::Gray(_) => {}
            other => {
                return Err(RasterError::UnsupportedSampleType {
                    reason: format!("{other:?} in {}", path.display()),
                });
            }
        }

        let (width, height) = decoder.dimensions()?;
        let (chunk_width, chunk_height) = decoder.chunk_dimensions();
        let layout = if chunk_width >= width {
            ChunkLayout::Stripped {
                rows_per_strip: chunk_height.max(1),
            }
        } else {
            ChunkLayout::Tiled {
                tile_width: chunk_width,
                tile_height: chunk_height,
                tiles_per_row: width.div_ceil(chunk_width),
            }
        };

        let geokeys = read_geokeys(&mut decoder)?;
        let crs = resolve_crs(&geokeys)?;

        let mut transform = read_transform(&mut decoder, path)?;
        if geokeys.get(&GT_RASTER_TYPE) == Some(&RASTER_PIXEL_IS_POINT) {
            transform = transform.centre_to_corner();
        }

        let nodata = read_nodata(&mut decoder)?;

        debug!(
            path = %path.display(),
            width,
            height,
            crs = crs.epsg(),
            ?nodata,
            "opened raster"
        );

        Ok(Self {
            path: path.to_path_buf(),
            decoder,
            width,
            height,
            layout,
            transform,
            crs,
            nodata,
            cache: HashMap::new(),
        })
    }

    /// Path the raster was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coordinate reference system of the pixel grid.
    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// GDAL no-data value, if declared.
    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    /// Pixel-to-world transform.
    pub fn transform(&self) -> GeoTransform {
        self.transform
    }

    /// Fractional pixel coordinates of a location, or `None` outside the
    /// raster extent.
    fn pixel_coords(&self, loc: &Location) -> Option<(f64, f64)> {
        let (x, y) = self.crs.project(loc);
        let (c, r) = self.transform.world_to_pixel(x, y);
        let inside = c >= 0.0 && r >= 0.0 && c < self.width as f64 && r < self.height as f64;
        inside.then_some((c, r))
    }

    /// Reads one pixel, mapping no-data and NaN to `None`.
    fn pixel(&mut self, col: u32, row: u32) -> Result<Option<f64>, RasterError> {
        let (chunk, local_col, local_row) = self.layout.locate(col, row);

        if !self.cache.contains_key(&chunk) {
            let decoded = self.decoder.read_chunk(chunk)?;
            let values = decoded_to_f64(decoded)?;
            self.cache.insert(chunk, values);
        }

        let stride = self.decoder.chunk_data_dimensions(chunk).0 as usize;
        let idx = local_row as usize * stride + local_col as usize;
        let value = self.cache.get(&chunk).and_then(|data| data.get(idx)).copied();

        Ok(value.filter(|&v| !v.is_nan() && !self.is_nodata(v)))
    }

    fn is_nodata(&self, v: f64) -> bool {
        match self.nodata {
            // The tag is decimal text while the pixels may be f32.
            Some(nd) => v == nd || v == f64::from(nd as f32),
            None => false,
        }
    }

    /// Value of the pixel containing `loc`.
    ///
    /// Returns `Ok(None)` when the location is outside the raster or the
    /// pixel holds no-data.
    pub fn value_at(&mut self, loc: &Location) -> Result<Option<f64>, RasterError> {
        match self.pixel_coords(loc) {
            Some((c, r)) => self.pixel(c.floor() as u32, r.floor() as u32),
            None => Ok(None),
        }
    }

    /// Bilinear interpolation between the four pixel centres surrounding
    /// `loc`. Along the raster border the nearest edge pixels are reused.
    ///
    /// Returns `Ok(None)` outside the extent or when any pixel with a
    /// non-zero weight holds no-data.
    pub fn interpolate_at(&mut self, loc: &Location) -> Result<Option<f64>, RasterError> {
        let Some((c, r)) = self.pixel_coords(loc) else {
            return Ok(None);
        };

        let max_c = (self.width - 1) as f64;
        let max_r = (self.height - 1) as f64;
        let u = (c - 0.5).clamp(0.0, max_c);
        let v = (r - 0.5).clamp(0.0, max_r);

        let c0 = u.floor() as u32;
        let r0 = v.floor() as u32;
        let c1 = (c0 + 1).min(self.width - 1);
        let r1 = (r0 + 1).min(self.height - 1);
        let tx = u - c0 as f64;
        let ty = v - r0 as f64;

        let corners = [
            (c0, r0, (1.0 - tx) * (1.0 - ty)),
            (c1, r0, tx * (1.0 - ty)),
            (c0, r1, (1.0 - tx) * ty),
            (c1, r1, tx * ty),
        ];
        let mut acc = 0.0;
        for (cc, rr, w) in corners {
            // Corners without weight may hold no-data.
            if w == 0.0 {
                continue;
            }
            match self.pixel(cc, rr)? {
                Some(v) => acc += v * w,
                None => return Ok(None),
            }
        }
        Ok(Some(acc))
    }

    /// All pixels within `win_range` rows/columns of the pixel containing
    /// `loc`, in row-major order and clipped to the raster.
    ///
    /// Returns an empty vector outside the extent. With `win_range == 0`
    /// this is the single containing pixel.
    pub fn window_at(
        &mut self,
        loc: &Location,
        win_range: u32,
    ) -> Result<Vec<Option<f64>>, RasterError> {
        let Some((c, r)) = self.pixel_coords(loc) else {
            return Ok(Vec::new());
        };
        let col = c.floor() as u32;
        let row = r.floor() as u32;

        let row_lo = row.saturating_sub(win_range);
        let row_hi = row.saturating_add(win_range).min(self.height - 1);
        let col_lo = col.saturating_sub(win_range);
        let col_hi = col.saturating_add(win_range).min(self.width - 1);

        let mut out = Vec::with_capacity(((row_hi - row_lo + 1) * (col_hi - col_lo + 1)) as usize);
        for rr in row_lo..=row_hi {
            for cc in col_lo..=col_hi {
                out.push(self.pixel(cc, rr)?);
            }
        }
        Ok(out)
    }
}

/// Reads the GeoKey directory into a key → short-value map. Keys stored in
/// the double or ASCII parameter tags are skipped.
fn read_geokeys(decoder: &mut Decoder<BufReader<File>>) -> Result<HashMap<u32, u32>, RasterError> {
    let mut keys = HashMap::new();
    let Some(value) = decoder.find_tag(Tag::GeoKeyDirectoryTag)? else {
        return Ok(keys);
    };
    let dir = value.into_u32_vec()?;
    if dir.len() < 4 {
        return Ok(keys);
    }
    let n_keys = dir[3] as usize;
    for entry in dir[4..].chunks_exact(4).take(n_keys) {
        let (key, location, value) = (entry[0], entry[1], entry[3]);
        if location == 0 {
            keys.insert(key, value);
        }
    }
    Ok(keys)
}

fn resolve_crs(geokeys: &HashMap<u32, u32>) -> Result<Crs, RasterError> {
    if let Some(&code) = geokeys.get(&PROJECTED_CS_TYPE) {
        return Crs::from_epsg(code);
    }
    if geokeys.get(&GT_MODEL_TYPE) == Some(&MODEL_TYPE_PROJECTED) {
        return Err(RasterError::UnsupportedCrs { code: USER_DEFINED });
    }
    // Any geographic system is read as WGS84 longitude/latitude.
    if let Some(&code) = geokeys.get(&GEOGRAPHIC_TYPE) {
        debug!(code, "geographic raster");
    }
    Ok(Crs::Wgs84)
}

fn read_transform(
    decoder: &mut Decoder<BufReader<File>>,
    path: &Path,
) -> Result<GeoTransform, RasterError> {
    if let Some(m) = decoder.find_tag(Tag::ModelTransformationTag)? {
        return GeoTransform::from_matrix(&m.into_f64_vec()?);
    }

    let scale = decoder.find_tag(Tag::ModelPixelScaleTag)?;
    let tiepoint = decoder.find_tag(Tag::ModelTiepointTag)?;
    match (scale, tiepoint) {
        (Some(s), Some(t)) => {
            GeoTransform::from_tiepoint(&s.into_f64_vec()?, &t.into_f64_vec()?).ok_or_else(|| {
                RasterError::MissingGeoreference {
                    path: path.to_path_buf(),
                }
            })
        }
        _ => Err(RasterError::MissingGeoreference {
            path: path.to_path_buf(),
        }),
    }
}

fn read_nodata(decoder: &mut Decoder<BufReader<File>>) -> Result<Option<f64>, RasterError> {
    let Some(value) = decoder.find_tag(Tag::GdalNodata)? else {
        return Ok(None);
    };
    let text = value.into_string()?;
    let text = text.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    Ok(text.parse::<f64>().ok())
}

fn decoded_to_f64(result: DecodingResult) -> Result<Vec<f64>, RasterError> {
    Ok(match result {
        DecodingResult::U8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::U64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::I8(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I16(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::I64(v) => v.into_iter().map(|x| x as f64).collect(),
        DecodingResult::F32(v) => v.into_iter().map(f64::from).collect(),
        DecodingResult::F64(v) => v,
        #[allow(unreachable_patterns)]
        _ => {
            return Err(RasterError::UnsupportedSampleType {
                reason: "unrecognised pixel encoding".to_string(),
            });
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::GeoTiffFixture;
    use tempfile::tempdir;

    const GT: GeoTransform = GeoTransform::new(5.0, 51.0, 0.05, -0.05);

    /// Float raster with value `row * 100 + col`.
    fn indexed(width: u32, height: u32) -> GeoTiffFixture {
        let data: Vec<f32> = (0..height)
            .flat_map(|r| (0..width).map(move |c| (r * 100 + c) as f32))
            .collect();
        GeoTiffFixture::f32(width, height, data, GT)
    }

    fn centre(col: usize, row: usize) -> Location {
        let (x, y) = GT.pixel_centre(col, row);
        Location::new(x, y).unwrap()
    }

    #[test]
    fn locate_stripped() {
        let layout = ChunkLayout::Stripped { rows_per_strip: 8 };
        assert_eq!(layout.locate(3, 0), (0, 3, 0));
        assert_eq!(layout.locate(3, 17), (2, 3, 1));
    }

    #[test]
    fn locate_tiled() {
        let layout = ChunkLayout::Tiled {
            tile_width: 16,
            tile_height: 16,
            tiles_per_row: 2,
        };
        assert_eq!(layout.locate(5, 5), (0, 5, 5));
        assert_eq!(layout.locate(18, 3), (1, 2, 3));
        assert_eq!(layout.locate(3, 17), (2, 3, 1));
        assert_eq!(layout.locate(19, 19), (3, 3, 3));
    }

    #[test]
    fn tiled_raster_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiled.tif");
        indexed(20, 20).with_tiles(16, 16).write(&path).unwrap();

        let mut raster = Raster::open(&path).unwrap();
        assert!(matches!(raster.layout, ChunkLayout::Tiled { tiles_per_row: 2, .. }));
        for (col, row) in [(5, 5), (15, 15), (18, 3), (3, 17), (18, 18), (19, 19)] {
            let expected = (row * 100 + col) as f64;
            assert_eq!(
                raster.value_at(&centre(col, row)).unwrap(),
                Some(expected),
                "pixel ({col}, {row})"
            );
        }
    }

    #[test]
    fn tiled_window_crosses_tiles() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tiled.tif");
        indexed(20, 20).with_tiles(16, 16).write(&path).unwrap();

        let mut raster = Raster::open(&path).unwrap();
        let window = raster.window_at(&centre(16, 16), 1).unwrap();
        let expected: Vec<Option<f64>> = (15..=17)
            .flat_map(|r| (15..=17).map(move |c| Some((r * 100 + c) as f64)))
            .collect();
        assert_eq!(window, expected);
    }

    #[test]
    fn huge_window_covers_whole_raster() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("strips.tif");
        indexed(10, 10).write(&path).unwrap();

        let mut raster = Raster::open(&path).unwrap();
        let window = raster.window_at(&centre(5, 5), u32::MAX).unwrap();
        assert_eq!(window.len(), 100);
        assert_eq!(window[55], Some(505.0));
        assert_eq!(window[99], Some(909.0));
    }
}
