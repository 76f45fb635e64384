use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Listing<T> {
  pub(crate) data: ListingData<T>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct ListingData<T> {
  pub(crate) children: Vec<T>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct Thing<T> {
  pub(crate) data: T,
}
