use crate::{id::*, principal::*, time::*};

#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id          : Id,
    pub title       : String,
    pub description : String,
    pub tags        : Vec<String>,
    pub date_added  : Timestamp,
    pub created_by  : Option<Principal>,
}
