//! Lossless mapping between [`EffectiveRequest`] and a flat query string.
//!
//! Wire form:
//! - scalar fields: `key=value`
//! - collection fields: repeated `key=v1&key=v2`, submission order preserved
//! - nested fields (one level): `key[sub]=value`, repeatable per sub-key
//! - null and empty values are omitted entirely
//! - list keys are always written, `orderBy=` included when there is no sort
//!
//! Pairs are form-urlencoded: brackets travel as `%5B`/`%5D`, spaces as `+`.
//!
//! Values that do not fit the declared shape fall back to the field's default
//! without surfacing an error.

use std::collections::BTreeMap;

use super::filter::{FieldShape, FilterState, FilterValue, StubFilterStructure};
use super::list_request::{
    EffectiveRequest, ListRequest, SortDirection, ORDER_BY_KEY, ORDER_DIRECTION_KEY,
    PAGE_INDEX_KEY, PAGE_SIZE_KEY,
};

/// Codec bound to one view: its stub structure and its default request.
#[derive(Debug, Clone)]
pub struct QueryStringCodec {
    stub: StubFilterStructure,
    defaults: EffectiveRequest,
}

impl QueryStringCodec {
    pub fn new(stub: StubFilterStructure, defaults: EffectiveRequest) -> Self {
        Self { stub, defaults }
    }

    pub fn stub(&self) -> &StubFilterStructure {
        &self.stub
    }

    pub fn defaults(&self) -> &EffectiveRequest {
        &self.defaults
    }

    pub fn decode(&self, query: &str) -> EffectiveRequest {
        decode_params(&parse_params(query), &self.stub, &self.defaults)
    }

    pub fn encode(&self, request: &EffectiveRequest) -> String {
        to_query_string(&encode_params(request))
    }
}

/// Splits a raw query string (with or without the leading `?`) into decoded pairs.
///
/// Pairs keep their order, repeated keys included. Pairs with an empty key are dropped.
pub fn parse_params(query: &str) -> Vec<(String, String)> {
    match serde_urlencoded::from_str::<Vec<(String, String)>>(query.trim_start_matches('?')) {
        Ok(pairs) => pairs.into_iter().filter(|(key, _)| !key.is_empty()).collect(),
        Err(e) => {
            log::debug!("query string: `{query}` is not form-urlencoded ({e}), ignored");
            Vec::new()
        }
    }
}

pub fn decode_params(
    params: &[(String, String)],
    stub: &StubFilterStructure,
    defaults: &EffectiveRequest,
) -> EffectiveRequest {
    // Значения по ключу, в порядке появления в строке
    let mut plain: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut nested: BTreeMap<&str, BTreeMap<&str, &str>> = BTreeMap::new();

    for (key, value) in params {
        match split_nested_key(key) {
            Some((name, sub)) => {
                nested.entry(name).or_default().entry(sub).or_insert(value);
            }
            None => plain.entry(key.as_str()).or_default().push(value),
        }
    }

    let list = decode_list_request(&mut plain, &defaults.list);
    let mut filter = defaults.filter.clone();

    for (name, values) in plain {
        match stub.shape_of(name) {
            Some(FieldShape::Collection) => {
                filter.set(name, FilterValue::list(values.iter().copied()));
            }
            Some(FieldShape::Nested) => {
                log::debug!("query string: `{name}` is declared nested, plain value ignored");
            }
            Some(FieldShape::Scalar) | None => {
                if let Some(first) = values.first() {
                    filter.set(name, FilterValue::scalar(*first));
                }
            }
        }
    }

    for (name, entries) in nested {
        match stub.shape_of(name) {
            Some(FieldShape::Nested) | None => {
                filter.set(name, FilterValue::map(entries));
            }
            Some(shape) => {
                log::debug!("query string: `{name}` is declared {shape:?}, bracket keys ignored");
            }
        }
    }

    EffectiveRequest::new(list, filter)
}

fn decode_list_request(plain: &mut BTreeMap<&str, Vec<&str>>, defaults: &ListRequest) -> ListRequest {
    let mut list = defaults.clone();

    if let Some(raw) = take_first(plain, PAGE_INDEX_KEY) {
        match raw.parse::<u32>() {
            Ok(page_index) => list.page_index = page_index,
            Err(_) => log::debug!("query string: bad {PAGE_INDEX_KEY} `{raw}`, using default"),
        }
    }
    if let Some(raw) = take_first(plain, PAGE_SIZE_KEY) {
        match raw.parse::<u32>() {
            Ok(page_size) if page_size > 0 => list.page_size = page_size,
            _ => log::debug!("query string: bad {PAGE_SIZE_KEY} `{raw}`, using default"),
        }
    }
    if let Some(raw) = take_first(plain, ORDER_BY_KEY) {
        list.order_by = raw.to_string();
    }
    if let Some(raw) = take_first(plain, ORDER_DIRECTION_KEY) {
        match SortDirection::from_code(raw) {
            Some(direction) => list.order_direction = direction,
            None => log::debug!("query string: bad {ORDER_DIRECTION_KEY} `{raw}`, using default"),
        }
    }

    list
}

fn take_first<'a>(plain: &mut BTreeMap<&str, Vec<&'a str>>, key: &str) -> Option<&'a str> {
    plain.remove(key).and_then(|values| values.first().copied())
}

/// Flattens a request into ordered key/value pairs. Filters come first, in key order.
pub fn encode_params(request: &EffectiveRequest) -> Vec<(String, String)> {
    let mut params = Vec::new();

    for (name, value) in request.filter.iter() {
        match value {
            FilterValue::Null => {}
            FilterValue::Scalar(v) => params.push((name.clone(), v.clone())),
            FilterValue::List(values) => {
                params.extend(values.iter().map(|v| (name.clone(), v.clone())));
            }
            FilterValue::Map(entries) => {
                params.extend(
                    entries
                        .iter()
                        .map(|(sub, v)| (format!("{name}[{sub}]"), v.clone())),
                );
            }
        }
    }

    // `orderBy=` is written even when empty, otherwise the view default would come back
    let list = &request.list;
    params.push((ORDER_BY_KEY.to_string(), list.order_by.clone()));
    params.push((
        ORDER_DIRECTION_KEY.to_string(),
        list.order_direction.code().to_string(),
    ));
    params.push((PAGE_INDEX_KEY.to_string(), list.page_index.to_string()));
    params.push((PAGE_SIZE_KEY.to_string(), list.page_size.to_string()));

    params
}

pub fn to_query_string(params: &[(String, String)]) -> String {
    serde_urlencoded::to_string(params).unwrap_or_else(|e| {
        log::warn!("query string: failed to encode {} pairs: {e}", params.len());
        String::new()
    })
}

/// `name[sub]` → `(name, sub)`. Only one level; `a[b][c]` and `a[]` are plain keys.
fn split_nested_key(key: &str) -> Option<(&str, &str)> {
    let open = key.find('[')?;
    let sub = key[open + 1..].strip_suffix(']')?;
    if open == 0 || sub.is_empty() || sub.contains(['[', ']']) {
        return None;
    }
    Some((&key[..open], sub))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn backlog_stub() -> StubFilterStructure {
        StubFilterStructure::new()
            .scalar("currentUserRelation")
            .scalar("type")
            .collection("tags")
            .scalar("search")
            .scalar("assignedUserId")
            .nested("created")
    }

    fn codec() -> QueryStringCodec {
        QueryStringCodec::new(
            backlog_stub(),
            EffectiveRequest::new(ListRequest::new(20), FilterState::new()),
        )
    }

    fn params_of(query: &str) -> Vec<(String, String)> {
        let mut params = parse_params(query);
        params.sort();
        params
    }

    #[test]
    fn test_scenario_scalar_filter_with_sort_and_paging() {
        let codec = codec();
        let request = EffectiveRequest::new(
            ListRequest::new(20)
                .sorted_by("number", SortDirection::Desc)
                .at_page(2),
            FilterState::new().with("type", FilterValue::scalar("bug")),
        );

        let query = codec.encode(&request);
        assert_eq!(
            params_of(&query),
            params_of("type=bug&orderBy=number&orderDirection=desc&pageIndex=2&pageSize=20")
        );
        assert_eq!(codec.decode(&query), request);
    }

    #[test]
    fn test_scenario_collection_keeps_submission_order() {
        let codec = codec();
        let request = EffectiveRequest::new(
            ListRequest::new(20),
            FilterState::new().with("tags", FilterValue::list(["urgent", "ui"])),
        );

        let query = codec.encode(&request);
        assert!(query.starts_with("tags=urgent&tags=ui&"));
        assert_eq!(
            codec.decode("tags=urgent&tags=ui").filter.get("tags"),
            Some(&FilterValue::list(["urgent", "ui"]))
        );
    }

    #[test]
    fn test_scalar_field_reads_first_value_only() {
        let decoded = codec().decode("type=bug&type=userStory");
        assert_eq!(decoded.filter.get("type"), Some(&FilterValue::scalar("bug")));
    }

    #[test]
    fn test_single_value_of_collection_is_a_list() {
        let decoded = codec().decode("?tags=ui");
        assert_eq!(decoded.filter.get("tags"), Some(&FilterValue::list(["ui"])));
    }

    #[test]
    fn test_bracket_keys_merge_into_one_map() {
        let decoded = codec().decode("created[from]=2024-01-01&created[to]=2024-02-01");
        assert_eq!(
            decoded.filter.get("created"),
            Some(&FilterValue::map([("from", "2024-01-01"), ("to", "2024-02-01")]))
        );
        assert_eq!(
            codec().encode(&decoded),
            "created%5Bfrom%5D=2024-01-01&created%5Bto%5D=2024-02-01&orderBy=&orderDirection=asc&pageIndex=0&pageSize=20"
        );
        assert_eq!(codec().decode(&codec().encode(&decoded)), decoded);
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let decoded = codec().decode("view=compact&extra[a]=1&deep[a][b]=2");
        assert_eq!(decoded.filter.get("view"), Some(&FilterValue::scalar("compact")));
        assert_eq!(decoded.filter.get("extra"), Some(&FilterValue::map([("a", "1")])));
        assert_eq!(decoded.filter.get("deep[a][b]"), Some(&FilterValue::scalar("2")));
        assert_eq!(codec().decode(&codec().encode(&decoded)), decoded);
    }

    #[test]
    fn test_empty_values_are_never_encoded() {
        let request = EffectiveRequest::new(
            ListRequest::new(20),
            backlog_stub()
                .empty_state()
                .with("search", FilterValue::Null)
                .with("tags", FilterValue::List(vec![])),
        );
        assert_eq!(
            codec().encode(&request),
            "orderBy=&orderDirection=asc&pageIndex=0&pageSize=20"
        );
    }

    #[test]
    fn test_absent_fields_fall_back_to_defaults() {
        let codec = QueryStringCodec::new(
            backlog_stub(),
            EffectiveRequest::new(
                ListRequest::new(50).sorted_by("number", SortDirection::Desc),
                FilterState::new().with("currentUserRelation", FilterValue::scalar("assignedTo")),
            ),
        );
        let decoded = codec.decode("");
        assert_eq!(decoded, *codec.defaults());

        let decoded = codec.decode("pageIndex=4");
        assert_eq!(decoded.list.page_index, 4);
        assert_eq!(decoded.list.order_by, "number");
        assert_eq!(
            decoded.filter.get("currentUserRelation"),
            Some(&FilterValue::scalar("assignedTo"))
        );
    }

    #[test]
    fn test_shape_mismatch_falls_back_silently() {
        let decoded = codec().decode(
            "pageIndex=-1&pageSize=0&orderDirection=sideways&type[x]=1&created=yesterday",
        );
        assert_eq!(decoded.list, ListRequest::new(20));
        assert_eq!(decoded.filter.get("type"), None);
        assert_eq!(decoded.filter.get("created"), None);

        let decoded = codec().decode("pageSize=abc&pageIndex=3");
        assert_eq!(decoded.list.page_size, 20);
        assert_eq!(decoded.list.page_index, 3);
    }

    #[test]
    fn test_percent_and_plus_decoding() {
        let decoded = codec().decode("search=login+page%20crash&tags=a%26b&orderBy=title");
        assert_eq!(
            decoded.filter.get("search"),
            Some(&FilterValue::scalar("login page crash"))
        );
        assert_eq!(decoded.filter.get("tags"), Some(&FilterValue::list(["a&b"])));
        assert_eq!(decoded.list.order_by, "title");

        let query = codec().encode(&decoded);
        assert!(query.contains("search=login+page+crash"));
        assert!(query.contains("tags=a%26b"));
        assert_eq!(codec().decode(&query), decoded);
    }

    #[test]
    fn test_empty_order_by_survives_a_non_empty_default() {
        let codec = QueryStringCodec::new(
            backlog_stub(),
            EffectiveRequest::new(
                ListRequest::new(20).sorted_by("number", SortDirection::Desc),
                FilterState::new(),
            ),
        );
        let unsorted = codec.decode("orderBy=");
        assert_eq!(unsorted.list.order_by, "");

        let query = codec.encode(&unsorted);
        assert!(query.starts_with("orderBy=&"));
        assert_eq!(codec.decode(&query), unsorted);
    }

    #[test]
    fn test_empty_scalar_string_survives() {
        let decoded = codec().decode("search=&&type");
        assert_eq!(decoded.filter.get("search"), Some(&FilterValue::scalar("")));
        assert_eq!(decoded.filter.get("type"), Some(&FilterValue::scalar("")));
    }

    #[test]
    fn test_split_nested_key() {
        assert_eq!(split_nested_key("a[b]"), Some(("a", "b")));
        assert_eq!(split_nested_key("a[b][c]"), None);
        assert_eq!(split_nested_key("a[]"), None);
        assert_eq!(split_nested_key("[b]"), None);
        assert_eq!(split_nested_key("plain"), None);
    }

    fn field_strategy() -> impl Strategy<Value = (FieldShape, FilterValue)> {
        let text = "\\PC{0,12}";
        prop_oneof![
            text.prop_map(|s| (FieldShape::Scalar, FilterValue::Scalar(s))),
            prop::collection::vec(text, 1..4)
                .prop_map(|v| (FieldShape::Collection, FilterValue::List(v))),
            prop::collection::btree_map("[a-z][a-z0-9]{0,5}", text, 1..4)
                .prop_map(|m| (FieldShape::Nested, FilterValue::Map(m))),
        ]
    }

    fn request_strategy() -> impl Strategy<Value = (StubFilterStructure, EffectiveRequest)> {
        let name = "[a-z][a-zA-Z0-9]{0,7}".prop_filter("reserved list key", |n| {
            !crate::shared::list_request::LIST_REQUEST_KEYS.contains(&n.as_str())
        });
        (
            prop::collection::btree_map(name, field_strategy(), 0..5),
            "[a-zA-Z_. ]{0,10}",
            prop::bool::ANY,
            0u32..10_000,
            1u32..1_000,
        )
            .prop_map(|(fields, order_by, desc, page_index, page_size)| {
                let mut stub = StubFilterStructure::new();
                let mut filter = FilterState::new();
                for (name, (shape, value)) in fields {
                    stub = stub.field(name.clone(), shape);
                    filter.set(name, value);
                }
                let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
                let list = ListRequest::new(page_size)
                    .sorted_by(order_by, direction)
                    .at_page(page_index);
                (stub, EffectiveRequest::new(list, filter))
            })
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(
            (stub, request) in request_strategy(),
            default_order_by in "[a-z]{0,6}",
        ) {
            let codec = QueryStringCodec::new(
                stub,
                EffectiveRequest::new(
                    ListRequest::new(25).sorted_by(default_order_by, SortDirection::Desc),
                    FilterState::new(),
                ),
            );
            prop_assert_eq!(codec.decode(&codec.encode(&request)), request);
        }
    }
}
