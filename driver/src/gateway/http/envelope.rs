use serde::Deserialize;

/// Payload either bare or wrapped as `{"data": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

/// List payload, either a plain array or an object keyed by the resource name.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum Listing<T> {
    Plain(Vec<T>),
    Keyed(Keyed<T>),
}

#[derive(Debug, Deserialize)]
pub(super) struct Keyed<T> {
    #[serde(
        alias = "books",
        alias = "users",
        alias = "borrowings",
        alias = "reviews",
        alias = "genres",
        alias = "authors"
    )]
    items: Vec<T>,
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Plain(items) => items,
            Listing::Keyed(Keyed { items }) => items,
        }
    }
}

/// Error body of a refused request.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|message| !message.trim().is_empty())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    fn list(json: &str) -> Vec<Item> {
        serde_json::from_str::<Envelope<Listing<Item>>>(json)
            .unwrap()
            .into_inner()
            .into_vec()
    }

    #[test]
    fn every_list_shape_decodes_the_same() {
        let expected = vec![Item { id: 1 }, Item { id: 2 }];
        assert_eq!(list(r#"[{"id":1},{"id":2}]"#), expected);
        assert_eq!(list(r#"{"data":[{"id":1},{"id":2}]}"#), expected);
        assert_eq!(list(r#"{"books":[{"id":1},{"id":2}],"total":2}"#), expected);
        assert_eq!(list(r#"{"data":{"borrowings":[{"id":1},{"id":2}]}}"#), expected);
        assert_eq!(list(r#"{"items":[{"id":1},{"id":2}]}"#), expected);
    }

    #[test]
    fn single_item_wrapped_or_not() {
        let wrapped = serde_json::from_str::<Envelope<Item>>(r#"{"data":{"id":4}}"#).unwrap();
        assert_eq!(wrapped.into_inner(), Item { id: 4 });
        let bare = serde_json::from_str::<Envelope<Item>>(r#"{"id":4,"title":"x"}"#).unwrap();
        assert_eq!(bare.into_inner(), Item { id: 4 });
    }

    #[test]
    fn error_message_prefers_message_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":"Conflict","message":"No copies available"}"#)
                .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("No copies available"));
        let body: ErrorBody = serde_json::from_str(r#"{"message":" "}"#).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
