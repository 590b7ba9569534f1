use serde_json::json;
use wesichain_azure_search::filter::{to_odata_filter, AzureSearchFilter};
use wesichain_azure_search::AzureSearchError;
use wesichain_core::MetadataFilter;

#[test]
fn string_in_uses_search_in() {
    let filter = AzureSearchFilter::Typed(MetadataFilter::In(
        "category".to_string(),
        vec![json!("docs"), json!("blog")],
    ));
    assert_eq!(
        to_odata_filter(&filter).unwrap(),
        "search.in(category, 'docs,blog', ',')"
    );
}

#[test]
fn nested_groups_are_parenthesised() {
    let filter = AzureSearchFilter::Typed(MetadataFilter::Any(vec![
        MetadataFilter::eq("published", true),
        MetadataFilter::All(vec![
            MetadataFilter::eq("lang", "en"),
            MetadataFilter::Range {
                key: "score".to_string(),
                min: Some(json!(0.5)),
                max: None,
            },
        ]),
    ]));

    assert_eq!(
        to_odata_filter(&filter).unwrap(),
        "(published eq true) or ((lang eq 'en') and (score ge 0.5))"
    );
}

#[test]
fn raw_filters_pass_through() {
    let filter = AzureSearchFilter::Raw("geo.distance(loc, geography'POINT(0 0)') le 10".to_string());
    assert_eq!(
        to_odata_filter(&filter).unwrap(),
        "geo.distance(loc, geography'POINT(0 0)') le 10"
    );
}

#[test]
fn empty_groups_and_ranges_are_rejected() {
    let empty_group = AzureSearchFilter::Typed(MetadataFilter::All(vec![]));
    assert!(matches!(
        to_odata_filter(&empty_group),
        Err(AzureSearchError::UnsupportedFilter(_))
    ));

    let open_range = AzureSearchFilter::Typed(MetadataFilter::Range {
        key: "year".to_string(),
        min: None,
        max: None,
    });
    assert!(matches!(
        to_odata_filter(&open_range),
        Err(AzureSearchError::UnsupportedFilter(_))
    ));
}

#[test]
fn keys_that_are_not_field_names_are_rejected() {
    let bad_keys = ["title eq 'x' or x", "bad key", "", "1st", "a,b"];
    for key in bad_keys {
        let filters = [
            MetadataFilter::eq(key, "docs"),
            MetadataFilter::In(key.to_string(), vec![json!("docs")]),
            MetadataFilter::In(key.to_string(), vec![json!(1)]),
            MetadataFilter::between(key, 1, 2),
        ];
        for filter in filters {
            assert!(
                matches!(
                    to_odata_filter(&AzureSearchFilter::Typed(filter.clone())),
                    Err(AzureSearchError::UnsupportedFilter(_))
                ),
                "{filter:?}"
            );
        }
    }

    let nested = AzureSearchFilter::Typed(MetadataFilter::eq("address/city", "Oslo"));
    assert_eq!(to_odata_filter(&nested).unwrap(), "address/city eq 'Oslo'");
}
