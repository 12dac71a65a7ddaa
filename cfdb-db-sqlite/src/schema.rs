///////////////////////////////////////////////////////////////////////
// Records
///////////////////////////////////////////////////////////////////////

table! {
    records (region, key) {
        region -> SmallInt,
        key -> Text,
        value -> Binary,
    }
}
