//! Typed cache keys for catalog endpoints.
//!
//! One record per endpoint captures that endpoint's logical request
//! identity and serializes it through [`RequestKey`] in a fixed field
//! order. Repositories never concatenate key strings by hand, which keeps
//! the sentinel and separator conventions in one place.

use roam_cache::RequestKey;
use roam_core::types::BundleQuery;

const NS_COUNTRIES: &str = "catalog:countries";
const NS_REGIONS: &str = "catalog:regions";
const NS_BUNDLE_LIST: &str = "catalog:bundles";
const NS_BUNDLE_DETAIL: &str = "catalog:bundle";

/// Key for the localized country list.
#[derive(Clone, Copy, Debug)]
pub struct CountriesKey<'a> {
    /// Display-language code.
    pub locale: &'a str,
}

impl CountriesKey<'_> {
    /// Serializes the key.
    pub fn build(&self) -> String {
        RequestKey::new(NS_COUNTRIES).locale(self.locale).finish()
    }
}

/// Key for the localized region list.
#[derive(Clone, Copy, Debug)]
pub struct RegionsKey<'a> {
    /// Display-language code.
    pub locale: &'a str,
}

impl RegionsKey<'_> {
    /// Serializes the key.
    pub fn build(&self) -> String {
        RequestKey::new(NS_REGIONS).locale(self.locale).finish()
    }
}

/// Key for one page of bundle listings.
#[derive(Clone, Copy, Debug)]
pub struct BundleListKey<'a> {
    /// Display-language code.
    pub locale: &'a str,
    /// Page plus optional country/region filters.
    pub query: &'a BundleQuery,
}

impl BundleListKey<'_> {
    /// Serializes the key: locale, page, country filter, region filter.
    pub fn build(&self) -> String {
        RequestKey::new(NS_BUNDLE_LIST)
            .locale(self.locale)
            .number(u64::from(self.query.page))
            .opt(self.query.country.as_deref())
            .opt(self.query.region.as_deref())
            .finish()
    }
}

/// Key for one bundle's detail payload.
#[derive(Clone, Copy, Debug)]
pub struct BundleDetailKey<'a> {
    /// Display-language code.
    pub locale: &'a str,
    /// Stable bundle code.
    pub code: &'a str,
}

impl BundleDetailKey<'_> {
    /// Serializes the key.
    pub fn build(&self) -> String {
        RequestKey::new(NS_BUNDLE_DETAIL)
            .locale(self.locale)
            .part(self.code)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locales_produce_distinct_keys() {
        let en = CountriesKey { locale: "en" }.build();
        let fr = CountriesKey { locale: "fr" }.build();
        assert_ne!(en, fr);
        assert_eq!(en, "catalog:countries:en");
    }

    #[test]
    fn test_list_key_layout() {
        let query = BundleQuery::default().on_page(2).for_country("HK");
        let key = BundleListKey { locale: "en", query: &query }.build();
        assert_eq!(key, "catalog:bundles:en:2:hk:-");
    }

    #[test]
    fn test_unfiltered_and_sentinel_filter_differ() {
        let unfiltered = BundleQuery::default();
        let literal = BundleQuery::default().for_country("-");

        let plain = BundleListKey { locale: "en", query: &unfiltered }.build();
        let dashed = BundleListKey { locale: "en", query: &literal }.build();
        assert_ne!(plain, dashed);
    }

    #[test]
    fn test_pages_produce_distinct_keys() {
        let first = BundleQuery::default();
        let second = BundleQuery::default().on_page(2);

        let one = BundleListKey { locale: "en", query: &first }.build();
        let two = BundleListKey { locale: "en", query: &second }.build();
        assert_ne!(one, two);
    }

    #[test]
    fn test_detail_key_normalizes_code() {
        let upper = BundleDetailKey { locale: "en", code: "HK-5GB-30D" }.build();
        let lower = BundleDetailKey { locale: "en", code: "hk-5gb-30d" }.build();
        assert_eq!(upper, lower);
        assert_eq!(lower, "catalog:bundle:en:hk-5gb-30d");
    }

    #[test]
    fn test_list_and_detail_namespaces_disjoint() {
        let query = BundleQuery::default();
        let list = BundleListKey { locale: "en", query: &query }.build();
        let detail = BundleDetailKey { locale: "en", code: "1" }.build();
        assert_ne!(list, detail);
    }
}
