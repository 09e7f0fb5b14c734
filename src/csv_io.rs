//! Loading and exporting contacts as two-column CSV.
//!
//! Files carry a `name,phone` header row followed by one row per contact.
//! Values are written verbatim; they were already trimmed when each
//! [`Contact`] was built. Reading is all-or-nothing: the whole input is parsed
//! before the first contact reaches the index, so a malformed row leaves the
//! index untouched and surfaces as one [`enum@Error`].
//!
//! # Examples
//!
//! ```
//! use contact_index::{ContactIndex, Order};
//!
//! let mut contacts = ContactIndex::new();
//! let rows = contacts.load_csv("name,phone\nBeto, 222\nAna,111\n".as_bytes())?;
//! assert_eq!(rows, 2);
//!
//! let mut out = Vec::new();
//! contacts.export_csv(&mut out, Order::InOrder)?;
//! assert_eq!(String::from_utf8(out).unwrap(), "name,phone\nAna,111\nBeto,222\n");
//! # Ok::<(), contact_index::Error>(())
//! ```

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::{CaseFolding, Contact, ContactIndex, Order};

/// Header of the name column.
pub const NAME_COLUMN: &str = "name";
/// Header of the phone column.
pub const PHONE_COLUMN: &str = "phone";

/// Dialect options for reading and writing contact files.
///
/// The default is comma separated with a header row.
///
/// # Examples
///
/// ```
/// use contact_index::csv_io::{self, CsvFormat};
///
/// let format = CsvFormat::new().delimiter(b';').has_headers(false);
/// let contacts = csv_io::read_contacts_with("Ana;111\n".as_bytes(), &format)?;
/// assert_eq!(contacts[0].phone(), "111");
/// # Ok::<(), contact_index::Error>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CsvFormat {
    delimiter: u8,
    has_headers: bool,
}

impl CsvFormat {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Whether the first row is a `name,phone` header. Without a header, the
    /// name is the first column and the phone the second.
    #[must_use]
    pub const fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    #[must_use]
    pub const fn get_delimiter(&self) -> u8 {
        self.delimiter
    }

    #[must_use]
    pub const fn get_has_headers(&self) -> bool {
        self.has_headers
    }

    fn reader<R: io::Read>(&self, reader: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new().delimiter(self.delimiter).has_headers(self.has_headers).from_reader(reader)
    }

    fn writer<W: io::Write>(&self, writer: W) -> csv::Writer<W> {
        // The header is written by hand so that an empty export still has one.
        csv::WriterBuilder::new().delimiter(self.delimiter).has_headers(false).from_writer(writer)
    }
}

impl Default for CsvFormat {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct Row {
    name: String,
    phone: String,
}

#[derive(Serialize)]
struct RowRef<'a> {
    name: &'a str,
    phone: &'a str,
}

/// Parses every contact in `reader`, in file order.
///
/// # Errors
///
/// Returns [`Error::Csv`] if the input cannot be read, a row is malformed, or
/// the `name` or `phone` column is missing. No partial result is returned.
pub fn read_contacts<R: io::Read>(reader: R) -> Result<Vec<Contact>> {
    read_contacts_with(reader, &CsvFormat::default())
}

/// [`read_contacts`] with an explicit [`CsvFormat`].
///
/// # Errors
///
/// See [`read_contacts`].
pub fn read_contacts_with<R: io::Read>(reader: R, format: &CsvFormat) -> Result<Vec<Contact>> {
    let contacts = format
        .reader(reader)
        .deserialize::<Row>()
        .map(|row| row.map(|Row { name, phone }| Contact::new(name, phone)))
        .collect::<Result<Vec<_>, csv::Error>>()?;

    debug!(rows = contacts.len(), "read contacts");
    Ok(contacts)
}

/// Writes a header and one row per contact to `writer`, returning the number
/// of rows written.
///
/// # Errors
///
/// Returns [`Error::Csv`] or [`Error::Io`] if writing fails.
pub fn write_contacts<'a, W, I>(writer: W, contacts: I) -> Result<usize>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Contact>,
{
    write_contacts_with(writer, contacts, &CsvFormat::default())
}

/// [`write_contacts`] with an explicit [`CsvFormat`].
///
/// # Errors
///
/// See [`write_contacts`].
pub fn write_contacts_with<'a, W, I>(writer: W, contacts: I, format: &CsvFormat) -> Result<usize>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Contact>,
{
    let mut out = format.writer(writer);
    if format.has_headers {
        out.write_record([NAME_COLUMN, PHONE_COLUMN])?;
    }

    let mut rows = 0;
    for contact in contacts {
        out.serialize(RowRef {
            name: contact.name(),
            phone: contact.phone(),
        })?;
        rows += 1;
    }
    out.flush()?;

    Ok(rows)
}

impl<F: CaseFolding> ContactIndex<F> {
    /// Reads every contact from CSV and inserts them in file order. Returns the
    /// number of rows read, which exceeds the growth in [`len`](Self::len) when
    /// the file repeats a name.
    ///
    /// # Errors
    ///
    /// Fails as [`read_contacts`] does. On failure nothing is inserted.
    pub fn load_csv<R: io::Read>(&mut self, reader: R) -> Result<usize> {
        self.load_csv_with(reader, &CsvFormat::default())
    }

    /// [`load_csv`](Self::load_csv) with an explicit [`CsvFormat`].
    ///
    /// # Errors
    ///
    /// See [`load_csv`](Self::load_csv).
    pub fn load_csv_with<R: io::Read>(&mut self, reader: R, format: &CsvFormat) -> Result<usize> {
        let contacts = read_contacts_with(reader, format)?;
        Ok(self.load(contacts))
    }

    /// Loads contacts from the CSV file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] if the file cannot be opened, otherwise fails as
    /// [`load_csv`](Self::load_csv) does.
    pub fn load_csv_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::open(path, source))?;
        let rows = self.load_csv(file)?;
        debug!(path = %path.display(), rows, "loaded contacts file");
        Ok(rows)
    }
}

impl<F> ContactIndex<F> {
    /// Writes every contact in `order` as CSV and returns the number of rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Csv`] or [`Error::Io`] if writing fails.
    pub fn export_csv<W: io::Write>(&self, writer: W, order: Order) -> Result<usize> {
        self.export_csv_with(writer, order, &CsvFormat::default())
    }

    /// [`export_csv`](Self::export_csv) with an explicit [`CsvFormat`].
    ///
    /// # Errors
    ///
    /// See [`export_csv`](Self::export_csv).
    pub fn export_csv_with<W: io::Write>(&self, writer: W, order: Order, format: &CsvFormat) -> Result<usize> {
        let rows = write_contacts_with(writer, self.traverse(order), format)?;
        debug!(%order, rows, "exported contacts");
        Ok(rows)
    }

    /// Writes every contact in `order` to the file at `path`, replacing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] if the file cannot be created, otherwise fails
    /// as [`export_csv`](Self::export_csv) does.
    pub fn export_csv_file(&self, path: impl AsRef<Path>, order: Order) -> Result<usize> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::open(path, source))?;
        let rows = self.export_csv(file, order)?;
        debug!(path = %path.display(), %order, rows, "wrote contacts file");
        Ok(rows)
    }

    /// Writes one export per [`Order`] into `dir`, named by
    /// [`Order::export_file_name`], and returns their paths in [`Order::ALL`]
    /// order.
    ///
    /// # Errors
    ///
    /// Stops at the first file that fails, as
    /// [`export_csv_file`](Self::export_csv_file) does.
    pub fn export_all(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        Order::ALL
            .into_iter()
            .map(|order| -> Result<PathBuf> {
                let path = dir.join(order.export_file_name());
                self.export_csv_file(&path, order)?;
                Ok(path)
            })
            .collect()
    }
}
