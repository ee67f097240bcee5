// table.rs
use crate::errors::ServerError;
use crate::leads::enrich::{Enrichment, RowUpdate};
use crate::leads::record::{CrmEdit, LeadRecord, COLUMNS};
use rust_xlsxwriter::Workbook;
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

/// In-memory lead table. At most one row per place id; the first one seen stays.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    rows: Vec<LeadRecord>,
    seen: HashSet<String>,
}

pub struct Page<'a> {
    pub rows: &'a [LeadRecord],
    pub page: usize,
    pub total_pages: usize,
    /// Index of `rows[0]` in the whole table.
    pub offset: usize,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[LeadRecord] {
        &self.rows
    }

    /// Add records whose place id is new. Returns how many were added.
    pub fn append<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = LeadRecord>,
    {
        let before = self.rows.len();
        for rec in records {
            if rec.place_id.is_empty() {
                continue;
            }
            if self.seen.insert(rec.place_id.clone()) {
                self.rows.push(rec);
            }
        }
        self.rows.len() - before
    }

    pub fn merge(&mut self, other: ResultTable) -> usize {
        self.append(other.rows)
    }

    /// Throw away the current rows and start over with `records`.
    pub fn replace<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = LeadRecord>,
    {
        self.clear();
        self.append(records)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.seen.clear();
    }

    /// The first `limit` rows (enrichment works on a prefix).
    pub fn head(&self, limit: usize) -> &[LeadRecord] {
        &self.rows[..limit.min(self.rows.len())]
    }

    /// Write enrichment results into the rows that still hold those places.
    /// Found emails never replace one that is already set. Returns rows changed.
    pub fn apply_updates(&mut self, updates: Vec<RowUpdate>) -> usize {
        let mut pending: HashMap<String, Enrichment> = updates
            .into_iter()
            .map(|u| (u.place_id, u.found))
            .collect();

        let mut changed = 0;
        for row in &mut self.rows {
            let Some(found) = pending.remove(&row.place_id) else {
                continue;
            };
            match found {
                Enrichment::Details(details) => {
                    row.apply_details(&details);
                    changed += 1;
                }
                Enrichment::Emails(emails) if row.email.trim().is_empty() => {
                    row.email = emails;
                    changed += 1;
                }
                Enrichment::Emails(_) => {}
            }
        }
        changed
    }

    pub fn update_crm(&mut self, place_id: &str, edit: CrmEdit) -> bool {
        match self.rows.iter_mut().find(|r| r.place_id == place_id) {
            Some(row) => {
                row.apply_edit(edit);
                true
            }
            None => false,
        }
    }

    /// 1-based page of `page_size` rows; out-of-range pages clamp.
    pub fn page(&self, page: usize, page_size: usize) -> Page<'_> {
        let page_size = page_size.max(1);
        let total_pages = self.rows.len().div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);

        let start = ((page - 1) * page_size).min(self.rows.len());
        let end = (start + page_size).min(self.rows.len());

        Page {
            rows: &self.rows[start..end],
            page,
            total_pages,
            offset: start,
        }
    }

    /// Header plus every row, all columns. The header is written even when empty.
    pub fn export_csv<W: Write>(&self, writer: W) -> io::Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        wtr.write_record(COLUMNS)?;
        for rec in &self.rows {
            wtr.write_record(rec.to_row())?;
        }
        wtr.flush()
    }

    pub fn export_csv_bytes(&self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.export_csv(&mut buf)?;
        Ok(buf)
    }

    pub fn export_xlsx(&self) -> Result<Vec<u8>, ServerError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        for (col, header) in COLUMNS.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, *header)
                .map_err(|e| {
                    ServerError::Xlsx(format!("Failed to write header '{}': {}", header, e))
                })?;
        }

        for (i, rec) in self.rows.iter().enumerate() {
            let r = (i + 1) as u32;
            let numbers = [(3u16, rec.lat), (4, rec.lng), (5, rec.rating)];

            for (col, value) in rec.to_row().iter().enumerate() {
                let col = col as u16;
                if numbers.iter().any(|(c, _)| *c == col) {
                    continue;
                }
                worksheet.write_string(r, col, value).map_err(|e| {
                    ServerError::Xlsx(format!("Failed to write {}: {}", COLUMNS[col as usize], e))
                })?;
            }

            for (col, value) in numbers {
                if let Some(n) = value {
                    worksheet.write_number(r, col, n).map_err(|e| {
                        ServerError::Xlsx(format!("Failed to write {}: {}", COLUMNS[col as usize], e))
                    })?;
                }
            }
        }

        workbook
            .save_to_buffer()
            .map_err(|e| ServerError::Xlsx(format!("Failed to save workbook: {}", e)))
    }
}
