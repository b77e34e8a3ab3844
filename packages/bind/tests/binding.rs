use kvbind_bind::{bind_struct, get, set, Bindable, Binder, Error, Kind, MemoryStore, Options};

#[derive(Debug, Default, PartialEq)]
struct Service {
    name: String,
    port: u16,
}

bind_struct!(Service {
    name.key("NAME"),
    port.key("PORT"),
});

#[derive(Debug, Default, PartialEq)]
struct Endpoint {
    host: String,
    weight: f32,
}

bind_struct!(Endpoint {
    host.key("HOST"),
    weight.key("WEIGHT"),
});

#[derive(Debug, Default, PartialEq)]
struct Deployment {
    service: Service,
    primary: Box<Endpoint>,
    replicas: Vec<Endpoint>,
    region: Option<String>,
}

bind_struct!(Deployment {
    service.key("SERVICE"),
    primary.key("PRIMARY"),
    replicas.key("REPLICAS"),
    region.key("REGION"),
});

#[derive(Debug, Default, PartialEq)]
struct Tuning {
    workers: i32,
    ratio: f64,
    enabled: bool,
}

bind_struct!(Tuning {
    workers.key("WORKERS").default("4"),
    ratio.key("RATIO").default("0.75"),
    enabled.key("ENABLED").default("true"),
});

#[derive(Debug, Default, PartialEq)]
struct HalfTagged {
    name: String,
    secret: String,
}

bind_struct!(HalfTagged {
    name.key("NAME"),
    secret,
});

#[test]
fn blob_round_trip_of_flat_struct() {
    let mut store = MemoryStore::new();
    let service = Service {
        name: "svc".to_string(),
        port: 8080,
    };

    set(&mut store, "cfg", &service, &Options::blob()).unwrap();
    assert_eq!(store.get("cfg"), Some(r#"{"NAME":"svc","PORT":8080}"#));

    let mut back = Service::default();
    get(&mut store, "cfg", &mut back, &Options::blob()).unwrap();
    assert_eq!(back, service);
}

#[test]
fn blob_round_trip_of_nested_values() {
    let mut store = MemoryStore::new();
    let deployment = Deployment {
        service: Service {
            name: "api".to_string(),
            port: 443,
        },
        primary: Box::new(Endpoint {
            host: "a.internal".to_string(),
            weight: 0.1,
        }),
        replicas: vec![
            Endpoint {
                host: "b.internal".to_string(),
                weight: 0.5,
            },
            Endpoint {
                host: "c.internal".to_string(),
                weight: 0.4,
            },
        ],
        region: Some("eu-west".to_string()),
    };

    set(&mut store, "deploy", &deployment, &Options::blob()).unwrap();

    // Option must already point somewhere to be read into.
    let mut back = Deployment {
        region: Some(String::new()),
        ..Deployment::default()
    };
    get(&mut store, "deploy", &mut back, &Options::blob()).unwrap();
    assert_eq!(back, deployment);
}

#[test]
fn writes_are_idempotent() {
    let service = Service {
        name: "svc".to_string(),
        port: 8080,
    };

    for options in [Options::tag(), Options::blob()] {
        let mut once = MemoryStore::new();
        set(&mut once, "cfg", &service, &options).unwrap();

        let mut twice = once.clone();
        set(&mut twice, "cfg", &service, &options).unwrap();

        assert_eq!(once, twice);
    }
}

#[test]
fn scalars_round_trip_through_text() {
    let mut binder = Binder::new(MemoryStore::new());

    binder.set("SMALL", &-5i8).unwrap();
    binder.set("BIG", &9_007_199_254_740_993u64).unwrap();
    binder.set("RATIO", &0.1f32).unwrap();
    binder.set("FLAG", &true).unwrap();
    binder.set("TEXT", &"hello world".to_string()).unwrap();

    let mut small = 0i8;
    let mut big = 0u64;
    let mut ratio = 0f32;
    let mut flag = false;
    let mut text = String::new();

    binder.get("SMALL", &mut small).unwrap();
    binder.get("BIG", &mut big).unwrap();
    binder.get("RATIO", &mut ratio).unwrap();
    binder.get("FLAG", &mut flag).unwrap();
    binder.get("TEXT", &mut text).unwrap();

    assert_eq!(small, -5);
    assert_eq!(big, 9_007_199_254_740_993);
    assert_eq!(ratio, 0.1);
    assert!(flag);
    assert_eq!(text, "hello world");
}

#[test]
fn unsigned_above_signed_range_does_not_round_trip() {
    let mut store = MemoryStore::new();
    set(&mut store, "MAX", &u64::MAX, &Options::default()).unwrap();
    assert_eq!(store.get("MAX"), Some("-1"));

    let mut back = 0u64;
    let result = get(&mut store, "MAX", &mut back, &Options::default());
    assert!(matches!(result, Err(Error::Coercion { .. })));
}

#[test]
fn defaults_fill_absent_leaves() {
    let mut store = MemoryStore::with_entries([("WORKERS", "3.9")]);
    let mut tuning = Tuning::default();

    get(&mut store, "", &mut tuning, &Options::tag().with_defaults(true)).unwrap();

    assert_eq!(
        tuning,
        Tuning {
            workers: 3,
            ratio: 0.75,
            enabled: true,
        }
    );
}

#[test]
fn present_key_wins_over_default() {
    let mut store = MemoryStore::with_entries([("ENABLED", "false"), ("RATIO", "1.5")]);
    let mut tuning = Tuning::default();

    get(&mut store, "", &mut tuning, &Options::tag().with_defaults(true)).unwrap();

    assert_eq!(tuning.workers, 4);
    assert_eq!(tuning.ratio, 1.5);
    assert!(!tuning.enabled);
}

#[test]
fn blob_reads_require_complete_tags() {
    let mut store = MemoryStore::with_entries([("doc", r#"{"NAME":"n"}"#)]);
    let mut target = HalfTagged::default();

    let result = get(&mut store, "doc", &mut target, &Options::blob());
    assert!(matches!(
        result,
        Err(Error::MissingTagAnnotation { ref field, .. }) if field == "secret"
    ));
}

#[test]
fn missing_blob_is_key_not_found() {
    let mut store = MemoryStore::new();
    let mut service = Service::default();

    let result = get(&mut store, "cfg", &mut service, &Options::blob());
    assert!(matches!(result, Err(ref e) if e.is_not_found()));
    assert_eq!(service, Service::default());
}

#[test]
fn malformed_blob_is_decode_error() {
    let mut store = MemoryStore::with_entries([("cfg", "{not json")]);
    let mut service = Service::default();

    let result = get(&mut store, "cfg", &mut service, &Options::blob());
    assert!(matches!(result, Err(Error::Decode { .. })));
}

#[test]
fn tag_mode_reads_require_complete_tags() {
    let mut store = MemoryStore::with_entries([("NAME", "svc")]);
    let mut target = HalfTagged::default();

    let result = get(&mut store, "", &mut target, &Options::tag());
    assert!(matches!(
        result,
        Err(Error::MissingTagAnnotation { ref field, .. }) if field == "secret"
    ));
}

#[derive(Debug, Default, PartialEq)]
struct Untagged {
    name: String,
    nickname: Option<String>,
}

bind_struct!(Untagged { name, nickname });

#[test]
fn untagged_nil_field_round_trips_in_tag_mode() {
    let mut store = MemoryStore::new();
    let value = Untagged {
        name: "svc".to_string(),
        nickname: None,
    };

    set(&mut store, "", &value, &Options::tag()).unwrap();
    assert!(store.is_empty());

    let mut back = Untagged {
        name: "svc".to_string(),
        nickname: None,
    };
    get(&mut store, "", &mut back, &Options::tag().with_defaults(true)).unwrap();
    assert_eq!(back, value);
}

/// A hand-written impl for a value with no coercion.
struct Handle;

impl Bindable for Handle {
    fn kind(&self) -> Kind {
        Kind::Unsupported
    }
}

#[derive(Default)]
struct Holder {
    handle: Handle,
}

impl Default for Handle {
    fn default() -> Self {
        Handle
    }
}

bind_struct!(Holder {
    handle.key("HANDLE"),
});

#[test]
fn unsupported_kinds_fail_both_ways() {
    let mut store = MemoryStore::with_entries([("HANDLE", "1"), ("holder", r#"{"HANDLE":1}"#)]);

    let result = set(&mut store, "HANDLE", &Handle, &Options::default());
    assert!(matches!(result, Err(Error::UnsupportedType { .. })));

    let result = get(&mut store, "HANDLE", &mut Handle, &Options::default());
    assert!(matches!(result, Err(Error::UnsupportedType { .. })));

    let result = set(&mut store, "holder", &Holder::default(), &Options::blob());
    assert!(matches!(result, Err(Error::UnsupportedType { .. })));

    let result = get(&mut store, "", &mut Holder::default(), &Options::tag());
    assert!(matches!(result, Err(Error::UnsupportedType { .. })));

    let result = get(&mut store, "holder", &mut Holder::default(), &Options::blob());
    assert!(matches!(result, Err(Error::UnsupportedType { .. })));
}
