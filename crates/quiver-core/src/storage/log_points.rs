//! Append-only point log with an in-memory offset index.
//!
//! Every write appends one frame to `points.log` and the index maps each
//! live id to the offset of its latest upsert frame, so replay is a single
//! sequential pass and reads are one seek each.
//!
//! ## Frame layout
//!
//! ```text
//! [Marker: 1 byte (1 = upsert, 2 = delete)]
//! [Body length: 4 bytes LE]
//! [Body: bincode record]
//! ```
//!
//! Upsert bodies hold the full point; payloads travel as embedded JSON
//! bytes because JSON values do not round-trip through bincode. A
//! truncated trailing frame (torn write) is discarded at open.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::PointStorage;
use crate::error::{Error, Result};
use crate::point::{Payload, Point, PointId, PointVectors};

const UPSERT_MARKER: u8 = 1;
const DELETE_MARKER: u8 = 2;

/// On-log form of an external id. Externally tagged, unlike the
/// API-facing [`PointId`], so it survives bincode.
#[derive(Serialize, Deserialize)]
enum StoredId {
    Num(u64),
    Str(String),
}

impl From<&PointId> for StoredId {
    fn from(id: &PointId) -> Self {
        match id {
            PointId::Num(n) => Self::Num(*n),
            PointId::Uuid(s) => Self::Str(s.clone()),
        }
    }
}

impl From<StoredId> for PointId {
    fn from(id: StoredId) -> Self {
        match id {
            StoredId::Num(n) => Self::Num(n),
            StoredId::Str(s) => Self::Uuid(s),
        }
    }
}

/// On-log form of a point.
#[derive(Serialize, Deserialize)]
struct StoredPoint {
    id: StoredId,
    vectors: HashMap<String, Vec<f32>>,
    payload: Option<Vec<u8>>,
}

impl StoredPoint {
    fn from_point(point: &Point) -> Result<Self> {
        let payload = point
            .payload
            .as_ref()
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| Error::Serialization(e.to_string()))?;

        Ok(Self {
            id: StoredId::from(&point.id),
            vectors: point.vector.clone().into_named(),
            payload,
        })
    }

    fn into_point(self) -> Result<Point> {
        let payload: Option<Payload> = self
            .payload
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()
            .map_err(|e| Error::Serialization(e.to_string()))?;

        Ok(Point {
            id: self.id.into(),
            vector: PointVectors::Named(self.vectors),
            payload,
        })
    }
}

/// Append-only log adapter implementing [`PointStorage`].
#[allow(clippy::module_name_repetitions)]
pub struct LogPointStorage {
    path: PathBuf,
    writer: BufWriter<File>,
    reader: File,
    /// Live id -> offset of its latest upsert frame. Insertion order of
    /// the map is first-insertion order of the ids, which `load` preserves.
    index: IndexMap<PointId, u64>,
    log_len: u64,
}

impl LogPointStorage {
    /// Opens the log under `location`, creating the directory if needed,
    /// and replays it to rebuild the offset index.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or log cannot be created or the
    /// log contains an unknown frame marker.
    pub fn open(location: impl AsRef<Path>) -> Result<Self> {
        let path = location.as_ref().to_path_buf();
        std::fs::create_dir_all(&path)?;
        let log_path = path.join("points.log");

        if !log_path.exists() {
            File::create(&log_path)?;
        }

        let (index, log_len) = Self::replay(&log_path)?;

        // Drop a torn trailing frame so appends start on a clean boundary.
        let file_len = std::fs::metadata(&log_path)?.len();
        if log_len < file_len {
            tracing::warn!(
                discarded = file_len - log_len,
                "discarding truncated tail of point log"
            );
            OpenOptions::new()
                .write(true)
                .open(&log_path)?
                .set_len(log_len)?;
        }

        let writer_file = OpenOptions::new().append(true).open(&log_path)?;
        let reader = File::open(&log_path)?;

        Ok(Self {
            path,
            writer: BufWriter::new(writer_file),
            reader,
            index,
            log_len,
        })
    }

    /// Returns the directory this log lives in.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sequentially scans the log, tracking the latest upsert frame per id.
    fn replay(log_path: &Path) -> Result<(IndexMap<PointId, u64>, u64)> {
        let file = File::open(log_path)?;
        let mut reader = BufReader::new(file);
        let mut index = IndexMap::new();
        let mut pos: u64 = 0;

        loop {
            let mut marker = [0u8; 1];
            match reader.read_exact(&mut marker) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            }

            let mut len_buf = [0u8; 4];
            if reader.read_exact(&mut len_buf).is_err() {
                break;
            }
            let body_len = u32::from_le_bytes(len_buf) as usize;
            let mut body = vec![0u8; body_len];
            if reader.read_exact(&mut body).is_err() {
                break;
            }

            match marker[0] {
                UPSERT_MARKER => {
                    let record: StoredPoint = bincode::deserialize(&body)
                        .map_err(|e| Error::Serialization(e.to_string()))?;
                    // Re-inserting keeps the id's original position, so
                    // first-insertion order survives updates.
                    index.insert(record.id.into(), pos);
                }
                DELETE_MARKER => {
                    let id: StoredId = bincode::deserialize(&body)
                        .map_err(|e| Error::Serialization(e.to_string()))?;
                    index.shift_remove(&PointId::from(id));
                }
                other => {
                    return Err(Error::Serialization(format!(
                        "unknown log marker: {other}"
                    )));
                }
            }

            pos += 1 + 4 + body_len as u64;
        }

        Ok((index, pos))
    }

    fn append_frame(&mut self, marker: u8, body: &[u8]) -> Result<u64> {
        let offset = self.log_len;
        let body_len =
            u32::try_from(body.len()).map_err(|_| Error::Serialization("oversized record".to_string()))?;

        self.writer.write_all(&[marker])?;
        self.writer.write_all(&body_len.to_le_bytes())?;
        self.writer.write_all(body)?;
        self.writer.flush()?;

        self.log_len += 1 + 4 + body.len() as u64;
        Ok(offset)
    }

    fn read_frame(&mut self, offset: u64) -> Result<StoredPoint> {
        self.reader.seek(SeekFrom::Start(offset))?;

        let mut header = [0u8; 5];
        self.reader.read_exact(&mut header)?;
        let body_len = u32::from_le_bytes([header[1], header[2], header[3], header[4]]) as usize;

        let mut body = vec![0u8; body_len];
        self.reader.read_exact(&mut body)?;

        bincode::deserialize(&body).map_err(|e| Error::Serialization(e.to_string()))
    }
}

impl PointStorage for LogPointStorage {
    fn load(&mut self) -> Result<Vec<Point>> {
        let offsets: Vec<u64> = self.index.values().copied().collect();
        offsets
            .into_iter()
            .map(|offset| self.read_frame(offset)?.into_point())
            .collect()
    }

    fn persist(&mut self, point: &Point) -> Result<()> {
        let record = StoredPoint::from_point(point)?;
        let body = bincode::serialize(&record).map_err(|e| Error::Serialization(e.to_string()))?;
        let offset = self.append_frame(UPSERT_MARKER, &body)?;
        self.index.insert(point.id.clone(), offset);
        Ok(())
    }

    fn delete(&mut self, id: &PointId) -> Result<()> {
        if self.index.shift_remove(id).is_none() {
            return Ok(());
        }
        let body = bincode::serialize(&StoredId::from(id))
            .map_err(|e| Error::Serialization(e.to_string()))?;
        self.append_frame(DELETE_MARKER, &body)?;
        Ok(())
    }
}
