#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// Values are stored as opaque bytes. Encoding and decoding
// of records happens in the typed stores of cfdb-core.

use super::schema::*;

#[derive(Insertable)]
#[diesel(table_name = records)]
pub struct NewRecord<'a> {
    pub region: i16,
    pub key: &'a str,
    pub value: &'a [u8],
}

#[derive(Queryable)]
pub struct Record {
    pub key: String,
    pub value: Vec<u8>,
}
