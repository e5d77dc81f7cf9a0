//! Exact (brute-force) vector index.
//!
//! Vectors are stored row-major in one contiguous buffer. Search
//! scans every row; fine for the tens of thousands of chunks a
//! document collection produces.
//!
//! # Binary format (little-endian)
//!
//! ```text
//! magic    u32   "PMFX"
//! version  u16
//! metric   u8    0 = l2, 1 = cosine
//! dim      u32
//! count    u64
//! data     f32 * dim * count
//! ```

use crate::core::config::Metric;
use crate::core::error::{PdfMemError, Result};

const MAGIC: u32 = 0x5846_4d50; // "PMFX"
const FORMAT_VERSION: u16 = 1;
const HEADER_LEN: usize = 4 + 2 + 1 + 4 + 8;

/// Flat vector index with exact nearest-neighbour search
#[derive(Debug, Clone, PartialEq)]
pub struct FlatIndex {
    dimension: usize,
    metric: Metric,
    data: Vec<f32>,
}

/// A search hit: index position and score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub position: usize,
    /// Squared distance for L2 (lower is closer), similarity for
    /// cosine (higher is closer)
    pub score: f32,
}

impl FlatIndex {
    pub fn new(dimension: usize, metric: Metric) -> Self {
        Self {
            dimension,
            metric,
            data: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        if self.dimension == 0 {
            0
        } else {
            self.data.len() / self.dimension
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Append a vector; returns its position
    pub fn add(&mut self, vector: &[f32]) -> Result<usize> {
        if vector.len() != self.dimension {
            return Err(PdfMemError::StorageError(format!(
                "Vector dimension mismatch: index is {}, got {}",
                self.dimension,
                vector.len()
            )));
        }
        let position = self.len();
        self.data.extend_from_slice(vector);
        Ok(position)
    }

    /// Vector stored at `position`
    pub fn vector(&self, position: usize) -> Option<&[f32]> {
        let start = position.checked_mul(self.dimension)?;
        self.data.get(start..start + self.dimension)
    }

    /// The `k` closest vectors to `query`, best first
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if query.len() != self.dimension {
            return Err(PdfMemError::StorageError(format!(
                "Query dimension mismatch: index is {}, got {}",
                self.dimension,
                query.len()
            )));
        }

        let query_norm = magnitude(query);
        let mut hits: Vec<Neighbor> = self
            .data
            .chunks_exact(self.dimension.max(1))
            .enumerate()
            .map(|(position, row)| Neighbor {
                position,
                score: match self.metric {
                    Metric::L2 => euclidean_distance_squared(query, row),
                    Metric::Cosine => cosine_similarity(query, row, query_norm),
                },
            })
            .collect();

        match self.metric {
            Metric::L2 => hits.sort_by(|a, b| a.score.total_cmp(&b.score)),
            Metric::Cosine => hits.sort_by(|a, b| b.score.total_cmp(&a.score)),
        }
        hits.truncate(k);
        Ok(hits)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(HEADER_LEN + self.data.len() * 4);

        buffer.extend_from_slice(&MAGIC.to_le_bytes());
        buffer.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        buffer.push(match self.metric {
            Metric::L2 => 0,
            Metric::Cosine => 1,
        });
        buffer.extend_from_slice(&(self.dimension as u32).to_le_bytes());
        buffer.extend_from_slice(&(self.len() as u64).to_le_bytes());

        for value in &self.data {
            buffer.extend_from_slice(&value.to_le_bytes());
        }

        buffer
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(corrupt("file too short"));
        }

        let magic = u32::from_le_bytes(field(bytes, 0)?);
        if magic != MAGIC {
            return Err(corrupt("invalid magic"));
        }

        let version = u16::from_le_bytes(field(bytes, 4)?);
        if version != FORMAT_VERSION {
            return Err(corrupt(&format!("unsupported format version {version}")));
        }

        let metric = match bytes[6] {
            0 => Metric::L2,
            1 => Metric::Cosine,
            other => return Err(corrupt(&format!("unknown metric tag {other}"))),
        };

        let dimension = u32::from_le_bytes(field(bytes, 7)?) as usize;
        let count = u64::from_le_bytes(field(bytes, 11)?) as usize;

        let expected = count
            .checked_mul(dimension)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| corrupt("size overflow"))?;
        let payload = &bytes[HEADER_LEN..];
        if payload.len() != expected {
            return Err(corrupt(&format!(
                "expected {expected} data bytes, found {}",
                payload.len()
            )));
        }

        let data = payload
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        Ok(Self {
            dimension,
            metric,
            data,
        })
    }
}

/// Fixed-width header field at `offset`
fn field<const N: usize>(bytes: &[u8], offset: usize) -> Result<[u8; N]> {
    bytes
        .get(offset..offset + N)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| corrupt("truncated header"))
}

fn corrupt(detail: &str) -> PdfMemError {
    PdfMemError::StorageError(format!("Corrupt index file: {detail}"))
}

fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

fn euclidean_distance_squared(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

fn cosine_similarity(a: &[f32], b: &[f32], mag_a: f32) -> f32 {
    let mag_b = magnitude(b);
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (mag_a * mag_b)
}
