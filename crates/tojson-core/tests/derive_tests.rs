use std::collections::HashMap;
use std::fmt;

use serde_json::json;
use tojson_core::{convert, is_empty_value, ConversionError, Record, Reflect, ToJson};

// ============================================================================
// Field naming
// ============================================================================

#[test]
fn untagged_fields_are_snake_cased() {
    #[derive(Reflect)]
    #[allow(non_snake_case)]
    struct Account {
        pub UserID: u64,
        pub HTTPServer: String,
        pub createdAt: String,
        pub already_snake: bool,
    }

    let tree = convert(&Account {
        UserID: 7,
        HTTPServer: "edge".into(),
        createdAt: "today".into(),
        already_snake: true,
    })
    .unwrap();
    assert_eq!(
        tree,
        json!({"user_id": 7, "http_server": "edge", "created_at": "today", "already_snake": true})
    );
}

#[test]
fn tag_overrides_name() {
    #[derive(Reflect)]
    struct Event {
        #[json = "id"]
        pub event_id: u32,
        #[json = "when,omitempty"]
        pub starts_at: String,
        #[json = ",omitempty"]
        pub notes: String,
    }

    let tree = convert(&Event {
        event_id: 1,
        starts_at: "09:00".into(),
        notes: "bring snacks".into(),
    })
    .unwrap();
    assert_eq!(tree, json!({"id": 1, "when": "09:00", "notes": "bring snacks"}));
}

#[test]
fn dash_tag_always_omits() {
    #[derive(Reflect)]
    struct Login {
        pub user: String,
        #[json = "-"]
        pub password: String,
    }

    let tree = convert(&Login {
        user: "bob".into(),
        password: "hunter2".into(),
    })
    .unwrap();
    assert_eq!(tree, json!({"user": "bob"}));
}

#[test]
fn unknown_tag_options_are_ignored() {
    #[derive(Reflect)]
    struct Row {
        #[json = "count,string"]
        pub count: u32,
    }

    assert_eq!(convert(&Row { count: 0 }).unwrap(), json!({"count": 0}));
}

#[test]
fn raw_identifiers_lose_their_prefix() {
    #[derive(Reflect)]
    struct Token {
        pub r#type: String,
    }

    let tree = convert(&Token {
        r#type: "bearer".into(),
    })
    .unwrap();
    assert_eq!(tree, json!({"type": "bearer"}));
}

// ============================================================================
// Visibility
// ============================================================================

mod inner {
    use tojson_core::Reflect;

    #[derive(Reflect)]
    pub struct Session {
        pub id: u32,
        pub(crate) token: String,
        secret: String,
    }

    impl Session {
        pub fn new() -> Self {
            Self {
                id: 9,
                token: "t".into(),
                secret: "s".into(),
            }
        }

        pub fn secret(&self) -> &str {
            &self.secret
        }
    }
}

#[test]
fn only_public_fields_are_emitted() {
    let session = inner::Session::new();
    assert_eq!(convert(&session).unwrap(), json!({"id": 9}));
    assert_eq!(session.token, "t");
    assert_eq!(session.secret(), "s");
}

#[test]
fn private_fields_are_described_but_not_exported() {
    let session = inner::Session::new();
    let info = session.record_info();

    assert_eq!(info.type_name(), "Session");
    assert_eq!(info.field_count(), 3);
    let exported: Vec<bool> = info.fields().iter().map(|f| f.is_exported()).collect();
    assert_eq!(exported, vec![true, false, false]);
    assert!(session.field(1).is_none());
    assert!(session.field(0).is_some());
}

// ============================================================================
// omitempty
// ============================================================================

#[derive(Reflect, Default)]
struct Sparse {
    #[json = ",omitempty"]
    pub text: String,
    #[json = ",omitempty"]
    pub count: i32,
    #[json = ",omitempty"]
    pub total: u64,
    #[json = ",omitempty"]
    pub ratio: f64,
    #[json = ",omitempty"]
    pub flag: bool,
    #[json = ",omitempty"]
    pub items: Vec<i32>,
    #[json = ",omitempty"]
    pub lookup: HashMap<String, i32>,
    #[json = ",omitempty"]
    pub maybe: Option<i32>,
}

#[test]
fn omitempty_skips_zero_values_of_every_kind() {
    assert_eq!(convert(&Sparse::default()).unwrap(), json!({}));
}

#[test]
fn omitempty_keeps_non_zero_values() {
    let sparse = Sparse {
        text: "x".into(),
        count: -1,
        total: 2,
        ratio: 0.5,
        flag: true,
        items: vec![0],
        lookup: [("k".to_string(), 0)].into_iter().collect(),
        maybe: Some(0),
    };
    assert_eq!(
        convert(&sparse).unwrap(),
        json!({
            "text": "x",
            "count": -1,
            "total": 2,
            "ratio": 0.5,
            "flag": true,
            "items": [0],
            "lookup": {"k": 0},
            "maybe": 0
        })
    );
}

#[test]
fn omitempty_never_skips_records() {
    #[derive(Reflect)]
    struct Empty {}

    #[derive(Reflect)]
    struct Wrapper {
        #[json = ",omitempty"]
        pub inner: Empty,
    }

    assert_eq!(
        convert(&Wrapper { inner: Empty {} }).unwrap(),
        json!({"inner": {}})
    );
}

#[test]
fn is_empty_value_per_kind() {
    assert!(is_empty_value(&""));
    assert!(is_empty_value(&0i32));
    assert!(is_empty_value(&false));
    assert!(is_empty_value(&Vec::<u8>::new()));
    assert!(is_empty_value(&Option::<u8>::None));
    assert!(is_empty_value(&()));

    assert!(!is_empty_value(&"a"));
    assert!(!is_empty_value(&Some(0u8)));
    assert!(!is_empty_value(&Sparse::default()));
}

// ============================================================================
// Newtypes, generics, enums
// ============================================================================

#[test]
fn newtype_is_transparent() {
    #[derive(Reflect)]
    struct UserId(u64);

    #[derive(Reflect)]
    struct Names(Vec<String>);

    assert_eq!(convert(&UserId(42)).unwrap(), json!(42));
    assert_eq!(
        convert(&Names(vec!["a".into(), "b".into()])).unwrap(),
        json!(["a", "b"])
    );
}

#[test]
fn newtype_forwards_inner_hooks() {
    #[derive(Reflect)]
    struct Failure(std::io::Error);

    assert_eq!(
        convert(&Failure(std::io::Error::other("disk full"))).unwrap(),
        json!("disk full")
    );
}

#[test]
fn generic_record() {
    #[derive(Reflect)]
    struct Page<T> {
        pub items: Vec<T>,
        pub next: Option<String>,
    }

    let page = Page {
        items: vec![1u8, 2],
        next: None,
    };
    assert_eq!(convert(&page).unwrap(), json!({"items": [1, 2], "next": null}));
}

#[test]
fn borrowed_record() {
    #[derive(Reflect)]
    struct View<'a> {
        pub title: &'a str,
        pub tags: &'a [&'a str],
    }

    let tags = ["a", "b"];
    let view = View {
        title: "t",
        tags: &tags,
    };
    assert_eq!(convert(&view).unwrap(), json!({"title": "t", "tags": ["a", "b"]}));
}

#[derive(Reflect, Debug)]
#[reflect(to_json)]
enum Status {
    Active,
    Suspended { reason: String },
}

impl ToJson for Status {
    fn to_json(&self) -> Box<dyn Reflect + '_> {
        match self {
            Status::Active => Box::new("active"),
            Status::Suspended { reason } => Box::new(format!("suspended: {reason}")),
        }
    }
}

#[test]
fn enum_with_to_json_hook() {
    assert_eq!(convert(&Status::Active).unwrap(), json!("active"));
    assert_eq!(
        convert(&Status::Suspended {
            reason: "spam".into()
        })
        .unwrap(),
        json!("suspended: spam")
    );
}

#[derive(Reflect, Debug)]
#[reflect(error)]
enum LookupError {
    Missing(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Missing(key) => write!(f, "missing key {key}"),
        }
    }
}

impl std::error::Error for LookupError {}

#[test]
fn enum_with_error_hook() {
    let err = LookupError::Missing("id".into());
    assert_eq!(convert(&err).unwrap(), json!("missing key id"));
}

#[test]
fn tuple_struct_with_marshaler() {
    #[derive(Reflect, serde::Serialize)]
    #[reflect(serialize)]
    struct Point(i32, i32);

    assert_eq!(convert(&Point(1, 2)).unwrap(), json!([1, 2]));
}

#[test]
fn record_inside_hook_free_record_keeps_its_policy() {
    #[derive(Reflect)]
    #[allow(non_snake_case)]
    struct Line {
        pub LineNo: u32,
        #[json = ",omitempty"]
        pub Comment: String,
    }

    #[derive(Reflect)]
    struct File {
        pub lines: Vec<Line>,
    }

    let file = File {
        lines: vec![
            Line {
                LineNo: 1,
                Comment: String::new(),
            },
            Line {
                LineNo: 2,
                Comment: "todo".into(),
            },
        ],
    };
    assert_eq!(
        convert(&file).unwrap(),
        json!({"lines": [{"line_no": 1}, {"line_no": 2, "comment": "todo"}]})
    );
}

#[test]
fn field_metadata_is_not_a_value() {
    #[derive(Reflect)]
    struct One {
        pub x: u8,
    }

    let one = One { x: 1 };
    let field = one.record_info().fields()[0];
    assert!(matches!(
        convert(&field),
        Err(ConversionError::InvalidIntrospectionArgument { .. })
    ));
    assert!(matches!(
        convert(&field.policy()),
        Err(ConversionError::InvalidIntrospectionArgument { .. })
    ));
    assert_eq!(convert(&one).unwrap(), json!({"x": 1}));
}
