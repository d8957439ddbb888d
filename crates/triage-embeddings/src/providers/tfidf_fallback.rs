//! Local hashed term-frequency provider.
//!
//! Terms are hashed into fixed buckets with a sign bit, weighted by a
//! sublinear term frequency and a length-based IDF stand-in, then L2
//! normalized. Works offline; used when no API key is configured and in tests.

use std::collections::HashMap;

use triage_core::errors::TriageResult;
use triage_core::traits::IEmbeddingProvider;

pub struct TfIdfFallback {
    dimensions: usize,
    name: String,
}

impl TfIdfFallback {
    pub fn new(dimensions: usize) -> Self {
        let dimensions = dimensions.max(1);
        Self {
            dimensions,
            name: format!("tfidf-{dimensions}"),
        }
    }

    /// FNV-1a. Low bits pick the bucket, the top bit picks the sign.
    fn bucket(term: &str, dims: usize) -> (usize, f32) {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        for b in term.bytes() {
            h ^= u64::from(b);
            h = h.wrapping_mul(0x0100_0000_01b3);
        }
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        ((h % dims as u64) as usize, sign)
    }

    fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric() && c != '\'')
            .map(|s| s.trim_matches('\'').to_lowercase())
            .filter(|s| s.chars().count() >= 2)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in Self::terms(text) {
            *counts.entry(term).or_default() += 1;
        }

        let mut out = vec![0.0f32; self.dimensions];
        for (term, count) in &counts {
            let tf = 1.0 + (*count as f32).ln();
            let idf = 1.0 + (term.chars().count() as f32).ln();
            let (idx, sign) = Self::bucket(term, self.dimensions);
            out[idx] += sign * tf * idf;
        }

        let norm = out.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            out.iter_mut().for_each(|x| *x /= norm);
        }
        out
    }
}

impl IEmbeddingProvider for TfIdfFallback {
    fn embed(&self, text: &str) -> TriageResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn embed_batch(&self, texts: &[String]) -> TriageResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        true
    }
}
