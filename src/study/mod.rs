//! Per-study genotype container
//!
//! A [`StudyEntry`] associates one variant with the samples, files and
//! cohort statistics of a study. Sample data is a row-major matrix whose
//! column order is given by the FORMAT field list; rows may be shorter than
//! FORMAT, in which case the trailing fields are implicitly absent.
//!
//! Two derived indices are maintained:
//! - the sample-position map (insertion-ordered, contiguous `0..n-1`),
//!   shared behind an `Arc` so a decoder can hand the same read-only map to
//!   thousands of entries; mutation copies on write,
//! - the FORMAT-field → column index, built lazily in a `OnceLock` cell so
//!   concurrent readers never observe a partially built map, and cleared by
//!   any FORMAT mutation.

pub mod stats;

pub use stats::VariantStats;

use crate::error::VariantError;
use crate::variant::types::AlternateCoordinate;
use crate::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Per-file metadata attached to a study entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    /// File identifier
    pub file_id: String,
    /// Original call string for variants rewritten by normalization
    pub call: Option<String>,
    /// Free-form attributes (QUAL, FILTER, INFO key-values)
    pub attributes: IndexMap<String, String>,
}

impl FileEntry {
    pub fn new(file_id: impl Into<String>) -> Self {
        FileEntry {
            file_id: file_id.into(),
            call: None,
            attributes: IndexMap::new(),
        }
    }

    pub fn with_attributes(
        file_id: impl Into<String>,
        attributes: IndexMap<String, String>,
    ) -> Self {
        FileEntry {
            file_id: file_id.into(),
            call: None,
            attributes,
        }
    }
}

/// Per-study container of sample genotypes and file metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyEntry {
    study_id: String,
    files: Vec<FileEntry>,
    secondary_alternates: Vec<AlternateCoordinate>,
    format: Option<Vec<String>>,
    samples_data: Vec<Vec<String>>,
    stats: IndexMap<String, VariantStats>,
    #[serde(skip)]
    samples_position: Option<Arc<IndexMap<String, usize>>>,
    #[serde(skip)]
    format_index: OnceLock<HashMap<String, usize>>,
}

impl StudyEntry {
    /// Name of the default cohort
    pub const DEFAULT_COHORT: &'static str = "ALL";

    pub fn new(study_id: impl Into<String>) -> Self {
        StudyEntry {
            study_id: study_id.into(),
            files: Vec::new(),
            secondary_alternates: Vec::new(),
            format: None,
            samples_data: Vec::new(),
            stats: IndexMap::new(),
            samples_position: None,
            format_index: OnceLock::new(),
        }
    }

    /// Builder: set the FORMAT field list
    pub fn with_format(mut self, format: Vec<String>) -> Self {
        self.set_format(format);
        self
    }

    /// Builder: set the default file id
    pub fn with_file_id(mut self, file_id: impl Into<String>) -> Self {
        self.set_file_id(file_id);
        self
    }

    pub fn study_id(&self) -> &str {
        &self.study_id
    }

    pub fn set_study_id(&mut self, study_id: impl Into<String>) {
        self.study_id = study_id.into();
    }

    // ------------------------------------------------------------------
    // Sample positions
    // ------------------------------------------------------------------

    /// The sample-name → row-index map, when set
    pub fn samples_position(&self) -> Option<&IndexMap<String, usize>> {
        self.samples_position.as_deref()
    }

    /// Install a sample-position map, re-sorting it into contiguous
    /// `0..n-1` form when needed
    ///
    /// A non-contiguous map is compacted preserving the relative order
    /// implied by its indices. On first assignment with an empty matrix,
    /// one empty row is padded per sample.
    pub fn set_samples_position(&mut self, positions: IndexMap<String, usize>) {
        let positions = if is_samples_position_sorted(&positions) {
            positions
        } else {
            sort_samples_position(&positions)
        };
        self.install_samples_position(Arc::new(positions));
    }

    /// Install an already-contiguous map without copying it
    ///
    /// The map is shared: a mutation through [`StudyEntry::add_sample_data`]
    /// copies it on write, leaving other holders untouched.
    pub fn set_sorted_samples_position(&mut self, positions: Arc<IndexMap<String, usize>>) {
        self.install_samples_position(positions);
    }

    fn install_samples_position(&mut self, positions: Arc<IndexMap<String, usize>>) {
        if self.samples_data.is_empty() {
            self.samples_data = vec![Vec::new(); positions.len()];
        }
        self.samples_position = Some(positions);
    }

    /// Sample names in row order
    pub fn sample_names(&self) -> Result<Vec<&str>> {
        let positions = self.require_samples_position("sample_names")?;
        Ok(positions.keys().map(String::as_str).collect())
    }

    fn require_samples_position(
        &self,
        operation: &'static str,
    ) -> Result<&IndexMap<String, usize>> {
        self.samples_position
            .as_deref()
            .ok_or(VariantError::PreconditionViolation { operation })
    }

    // ------------------------------------------------------------------
    // FORMAT fields
    // ------------------------------------------------------------------

    /// The FORMAT field list defining the sample-data column order
    pub fn format(&self) -> Option<&[String]> {
        self.format.as_deref()
    }

    /// The FORMAT list joined with `:` (e.g. `GT:DP:GQ`)
    pub fn format_string(&self) -> Option<String> {
        self.format.as_ref().map(|format| format.join(":"))
    }

    pub fn set_format(&mut self, format: Vec<String>) {
        self.format_index = OnceLock::new();
        self.format = Some(format);
    }

    /// Set the FORMAT list from its `:`-joined representation
    pub fn set_format_string(&mut self, format: &str) {
        self.set_format(format.split(':').map(str::to_string).collect());
    }

    /// Append one FORMAT field
    pub fn add_format(&mut self, field: impl Into<String>) {
        self.format_index = OnceLock::new();
        self.format.get_or_insert_with(Vec::new).push(field.into());
    }

    /// FORMAT field name → column index, built once per invalidation
    ///
    /// Concurrent readers either see the fully built map or build it
    /// themselves; the first finished build wins.
    pub fn format_positions(&self) -> &HashMap<String, usize> {
        self.format_index.get_or_init(|| {
            self.format
                .iter()
                .flatten()
                .enumerate()
                .map(|(index, field)| (field.clone(), index))
                .collect()
        })
    }

    // ------------------------------------------------------------------
    // Sample data
    // ------------------------------------------------------------------

    /// The row-major sample data matrix
    pub fn samples_data(&self) -> &[Vec<String>] {
        &self.samples_data
    }

    /// Replace the whole sample data matrix
    pub fn set_samples_data(&mut self, samples_data: Vec<Vec<String>>) {
        self.samples_data = samples_data;
    }

    /// Add or overwrite the data row of one sample
    ///
    /// A known sample overwrites its row (growing the matrix with empty
    /// rows when its position exceeds the current size); an unknown sample
    /// is appended with the next free position. With no position map and an
    /// empty matrix, a fresh map is created.
    pub fn add_sample_data(&mut self, name: impl Into<String>, values: Vec<String>) {
        let name = name.into();
        if self.samples_position.is_none() && self.samples_data.is_empty() {
            self.samples_position = Some(Arc::new(IndexMap::new()));
        }
        match &mut self.samples_position {
            Some(positions) => {
                if let Some(&position) = positions.get(&name) {
                    while self.samples_data.len() <= position {
                        self.samples_data.push(Vec::new());
                    }
                    self.samples_data[position] = values;
                } else {
                    let positions = Arc::make_mut(positions);
                    positions.insert(name, positions.len());
                    self.samples_data.push(values);
                }
            }
            None => self.samples_data.push(values),
        }
    }

    /// Add a sample row from a field → value map
    ///
    /// Fails with `FieldMismatch` when the map contains keys not declared
    /// in FORMAT; fields declared in FORMAT but absent from the map are
    /// stored as empty values. With no FORMAT set, the map's key order
    /// becomes the FORMAT list.
    pub fn add_sample_data_map(
        &mut self,
        name: impl Into<String>,
        data: &IndexMap<String, String>,
    ) -> Result<()> {
        if self.format.is_none() {
            self.set_format(data.keys().cloned().collect());
        }
        let format = self.format.as_ref().expect("format was just set");
        let unknown: Vec<String> = data
            .keys()
            .filter(|key| !format.contains(key))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(VariantError::FieldMismatch { fields: unknown });
        }
        let values = format
            .iter()
            .map(|field| data.get(field).cloned().unwrap_or_default())
            .collect();
        self.add_sample_data(name, values);
        Ok(())
    }

    /// Set a single field of a single sample
    ///
    /// Fails with `IndexOutOfRange` when the sample or the field is
    /// unknown, and `PreconditionViolation` when no sample positions are
    /// set. A row shorter than the target column is padded with empty
    /// values.
    pub fn set_sample_data(
        &mut self,
        name: &str,
        field: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        let positions = self.require_samples_position("set_sample_data")?;
        let row = *positions
            .get(name)
            .ok_or_else(|| VariantError::unknown_sample(name))?;
        let column = *self
            .format_positions()
            .get(field)
            .ok_or_else(|| VariantError::unknown_field(field))?;

        while self.samples_data.len() <= row {
            self.samples_data.push(Vec::new());
        }
        let row_data = &mut self.samples_data[row];
        while row_data.len() < column {
            row_data.push(String::new());
        }
        if row_data.len() > column {
            row_data[column] = value.into();
        } else {
            row_data.push(value.into());
        }
        Ok(())
    }

    /// The value of one field of one sample
    ///
    /// `Ok(None)` for unknown samples, unknown fields, or rows shorter than
    /// the field's column (implicitly absent trailing fields).
    pub fn sample_data(&self, name: &str, field: &str) -> Result<Option<&str>> {
        let positions = self.require_samples_position("sample_data")?;
        let Some(&row) = positions.get(name) else {
            return Ok(None);
        };
        let Some(&column) = self.format_positions().get(field) else {
            return Ok(None);
        };
        Ok(self
            .samples_data
            .get(row)
            .and_then(|values| values.get(column))
            .map(String::as_str))
    }

    /// All fields of one sample as a field → value map
    pub fn sample_data_as_map(&self, name: &str) -> Result<Option<IndexMap<&str, &str>>> {
        let positions = self.require_samples_position("sample_data_as_map")?;
        let Some(&row) = positions.get(name) else {
            return Ok(None);
        };
        let format = self.format.as_deref().unwrap_or(&[]);
        let values = self.samples_data.get(row).map(Vec::as_slice).unwrap_or(&[]);
        Ok(Some(
            format
                .iter()
                .zip(values.iter())
                .map(|(field, value)| (field.as_str(), value.as_str()))
                .collect(),
        ))
    }

    // ------------------------------------------------------------------
    // Files and attributes
    // ------------------------------------------------------------------

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut Vec<FileEntry> {
        &mut self.files
    }

    pub fn set_files(&mut self, files: Vec<FileEntry>) {
        self.files = files;
    }

    pub fn add_file(&mut self, file: FileEntry) {
        self.files.push(file);
    }

    /// Look up a file sub-record by id
    pub fn file(&self, file_id: &str) -> Option<&FileEntry> {
        self.files.iter().find(|file| file.file_id == file_id)
    }

    pub fn file_mut(&mut self, file_id: &str) -> Option<&mut FileEntry> {
        self.files.iter_mut().find(|file| file.file_id == file_id)
    }

    /// Id of the default (first) file, when any
    pub fn file_id(&self) -> Option<&str> {
        self.files.first().map(|file| file.file_id.as_str())
    }

    /// Set the id of the default file, creating it when none exists
    pub fn set_file_id(&mut self, file_id: impl Into<String>) {
        match self.files.first_mut() {
            Some(file) => file.file_id = file_id.into(),
            None => self.files.push(FileEntry::new(file_id)),
        }
    }

    /// Attribute of the default (first) file
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.files
            .first()
            .and_then(|file| file.attributes.get(key))
            .map(String::as_str)
    }

    /// Set an attribute on the default file, creating it when none exists
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        if self.files.is_empty() {
            self.files.push(FileEntry::new(""));
        }
        self.files[0].attributes.insert(key.into(), value.into());
    }

    /// Set an attribute on an explicit file
    pub fn set_file_attribute(
        &mut self,
        file_id: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let file = self
            .file_mut(file_id)
            .ok_or_else(|| VariantError::invalid(format!("Unknown file id '{}'", file_id)))?;
        file.attributes.insert(key.into(), value.into());
        Ok(())
    }

    /// Attributes of all files, keyed as `fileId_attribute`
    pub fn all_attributes(&self) -> IndexMap<String, String> {
        let mut attributes = IndexMap::new();
        for file in &self.files {
            for (key, value) in &file.attributes {
                attributes.insert(format!("{}_{}", file.file_id, key), value.clone());
            }
        }
        attributes
    }

    // ------------------------------------------------------------------
    // Secondary alternates and cohort statistics
    // ------------------------------------------------------------------

    pub fn secondary_alternates(&self) -> &[AlternateCoordinate] {
        &self.secondary_alternates
    }

    pub fn set_secondary_alternates(&mut self, alternates: Vec<AlternateCoordinate>) {
        self.secondary_alternates = alternates;
    }

    /// The cohort-name → statistics map
    pub fn stats(&self) -> &IndexMap<String, VariantStats> {
        &self.stats
    }

    pub fn set_stats(&mut self, stats: IndexMap<String, VariantStats>) {
        self.stats = stats;
    }

    /// Statistics of one cohort
    pub fn cohort_stats(&self, cohort: &str) -> Option<&VariantStats> {
        self.stats.get(cohort)
    }

    /// Set the statistics of one cohort
    pub fn set_cohort_stats(&mut self, cohort: impl Into<String>, stats: VariantStats) {
        self.stats.insert(cohort.into(), stats);
    }
}

/// Whether a position map is already contiguous `0..n-1` in iteration order
pub fn is_samples_position_sorted(positions: &IndexMap<String, usize>) -> bool {
    positions
        .values()
        .enumerate()
        .all(|(expected, &position)| position == expected)
}

/// Compact a position map into contiguous `0..n-1` form
///
/// The relative order implied by the existing indices is preserved; ties
/// keep their insertion order.
pub fn sort_samples_position(positions: &IndexMap<String, usize>) -> IndexMap<String, usize> {
    let mut pairs: Vec<(&String, usize)> = positions
        .iter()
        .map(|(name, &position)| (name, position))
        .collect();
    pairs.sort_by_key(|&(_, position)| position);
    pairs
        .into_iter()
        .enumerate()
        .map(|(index, (name, _))| (name.clone(), index))
        .collect()
}

impl PartialEq for StudyEntry {
    /// Structural equality over the study content
    ///
    /// The sample-position map and the lazy format index are derived state
    /// and do not participate.
    fn eq(&self, other: &Self) -> bool {
        self.study_id == other.study_id
            && self.files == other.files
            && self.secondary_alternates == other.secondary_alternates
            && self.format == other.format
            && self.samples_data == other.samples_data
            && self.stats == other.stats
    }
}
