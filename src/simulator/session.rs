//! Session - lives accumulated across batches
//!
//! A session keeps every generated [`LifeRecord`] in generation order so the
//! whole run can be rendered or written out at the end.

use log::{info, warn};
use rand::Rng;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::TableBundle;
use crate::error::{LyfSimError, Result};

use super::{generate_batch, LifeRecord};

/// Width of the rule printed between rendered lives
pub const SEPARATOR_WIDTH: usize = 80;

/// Ordered record of every life generated in one run
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Session {
    lives: Vec<LifeRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a batch of `count` lives, append it, and return the new lives
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        tables: &TableBundle,
        count: usize,
    ) -> Result<&[LifeRecord]> {
        let batch = generate_batch(rng, tables, count)?;
        Ok(self.push_batch(batch))
    }

    /// Append already generated lives, keeping their order
    pub fn push_batch(&mut self, batch: Vec<LifeRecord>) -> &[LifeRecord] {
        let start = self.lives.len();
        self.lives.extend(batch);
        &self.lives[start..]
    }

    #[inline]
    pub fn lives(&self) -> &[LifeRecord] {
        &self.lives
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lives.is_empty()
    }

    /// Every life's summary, separated by a rule
    pub fn render(&self) -> String {
        render_lives(&self.lives)
    }

    /// Write the rendered session to `path` as plain text.
    ///
    /// Returns `false` without touching the filesystem when the session is
    /// empty.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        if self.is_empty() {
            warn!("No lives to save, skipping {}", path.display());
            return Ok(false);
        }
        fs::write(path, self.render()).map_err(|e| LyfSimError::io(path, e))?;
        info!("Saved {} lives to {}", self.len(), path.display());
        Ok(true)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Join rendered lives with a blank-padded rule of `=`
pub fn render_lives(lives: &[LifeRecord]) -> String {
    let separator = format!("\n{}\n\n", "=".repeat(SEPARATOR_WIDTH));
    lives
        .iter()
        .map(|life| life.to_string())
        .collect::<Vec<_>>()
        .join(&separator)
}
