use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Public listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    #[display("newest")]
    Newest,
    #[display("price_asc")]
    PriceAsc,
    #[display("price_desc")]
    PriceDesc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_codes() {
        let sort: ProductSort = serde_json::from_str(r#""price_asc""#).unwrap();
        assert_eq!(sort, ProductSort::PriceAsc);
        assert_eq!(ProductSort::default(), ProductSort::Newest);
        assert_eq!(ProductSort::PriceDesc.to_string(), "price_desc");
        assert!(serde_json::from_str::<ProductSort>(r#""cheapest""#).is_err());
    }
}
