use std::fmt;

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// A point in time with millisecond precision.
///
/// Stored as the number of milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn now() -> Self {
        OffsetDateTime::now_utc().into()
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        let millis = from.unix_timestamp_nanos() / 1_000_000;
        Self(millis as i64)
    }
}

impl TryFrom<Timestamp> for OffsetDateTime {
    type Error = time::error::ComponentRange;
    fn try_from(from: Timestamp) -> Result<Self, Self::Error> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(from.0) * 1_000_000)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match OffsetDateTime::try_from(*self)
            .ok()
            .and_then(|dt| dt.format(&Rfc3339).ok())
        {
            Some(formatted) => f.write_str(&formatted),
            None => write!(f, "{}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_from_into_millis() {
        let t1 = Timestamp::now();
        let t2 = Timestamp::from_millis(t1.as_millis());
        assert_eq!(t1, t2);
    }

    #[test]
    fn convert_from_offset_date_time() {
        let dt = time::macros::datetime!(2023-10-01 12:00:00.250 UTC);
        let ts = Timestamp::from(dt);
        assert_eq!(1_696_161_600_250, ts.as_millis());
        assert_eq!(dt, OffsetDateTime::try_from(ts).unwrap());
    }

    #[test]
    fn display_rfc3339() {
        let ts = Timestamp::from_millis(0);
        assert_eq!("1970-01-01T00:00:00Z", ts.to_string());
    }
}
