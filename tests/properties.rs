//! Property tests for names, validation and encoding.

use credhub_client::{
    wire, Actor, CredentialName, CredentialRequest, CredentialValue, Operation, Permission,
    SshCredential, UserCredential,
};
use proptest::prelude::*;
use serde_json::Value;

fn no_nulls(json: &Value) -> bool {
    match json {
        Value::Null => false,
        Value::Object(map) => map.values().all(no_nulls),
        Value::Array(items) => items.iter().all(no_nulls),
        _ => true,
    }
}

fn key() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-zA-Z0-9+/=]{0,40}")
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    proptest::collection::vec(
        prop_oneof![
            Just(Operation::Read),
            Just(Operation::Write),
            Just(Operation::Delete),
            Just(Operation::ReadAcl),
            Just(Operation::WriteAcl),
        ],
        0..8,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn name_has_exactly_one_leading_separator(raw in "/{0,4}[a-z0-9_-]{1,12}(/[a-z0-9_-]{1,12}){0,3}") {
        let name = CredentialName::new(&raw).unwrap();
        prop_assert!(name.as_str().starts_with('/'));
        prop_assert!(!name.as_str().starts_with("//"));
        prop_assert_eq!(name.as_str().trim_start_matches('/'), raw.trim_start_matches('/'));
    }

    #[test]
    fn name_normalization_is_idempotent(raw in "/{0,4}[a-z0-9/_-]{1,30}") {
        prop_assume!(!raw.trim_start_matches('/').is_empty());
        let once = CredentialName::new(&raw).unwrap();
        let twice = CredentialName::new(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn separator_only_names_are_rejected(raw in "/{0,10}") {
        prop_assert!(CredentialName::new(&raw).is_err());
    }

    #[test]
    fn ssh_builds_iff_a_key_is_present(public_key in key(), private_key in key()) {
        let public_set = public_key.as_deref().map_or(false, |k| !k.is_empty());
        let private_set = private_key.as_deref().map_or(false, |k| !k.is_empty());
        let has_key = public_set || private_set;

        let result = CredentialRequest::builder()
            .name(CredentialName::new("/example/ssh").unwrap())
            .value(SshCredential::new(public_key, private_key))
            .build();

        prop_assert_eq!(result.is_ok(), has_key);

        if let Ok(request) = result {
            let json = wire::to_wire(&request);
            prop_assert!(no_nulls(&json));
            prop_assert_eq!(json["value"].get("public_key").is_some(), public_set);
            prop_assert_eq!(json["value"].get("private_key").is_some(), private_set);
        }
    }

    #[test]
    fn encoding_is_repeatable(username in key(), password in key(), overwrite in any::<bool>()) {
        let request = CredentialRequest::builder()
            .name(CredentialName::new("/example/user").unwrap())
            .overwrite(overwrite)
            .value(UserCredential::new(username, password))
            .build()
            .unwrap();

        prop_assert_eq!(wire::to_json(&request), wire::to_json(&request));
        prop_assert!(no_nulls(&wire::to_wire(&request)));

        let back = wire::request_from_wire(&wire::to_wire(&request)).unwrap();
        prop_assert_eq!(back, request);
    }

    #[test]
    fn permission_operations_are_unique_and_ordered(ops in operations()) {
        let permission = Permission::new(Actor::App("guid".to_string())).allow_all(ops.clone());

        let mut expected: Vec<Operation> = Vec::new();
        for op in ops {
            if !expected.contains(&op) {
                expected.push(op);
            }
        }
        prop_assert_eq!(permission.operations(), expected.as_slice());
    }

    #[test]
    fn value_encodes_as_bare_string(value in "\\PC{0,40}") {
        let encoded = wire::encode_value(&CredentialValue::from(
            credhub_client::ValueCredential::new(value.clone()),
        ));
        prop_assert_eq!(encoded, Value::String(value));
    }
}
