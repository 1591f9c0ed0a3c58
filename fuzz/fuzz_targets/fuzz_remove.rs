#![no_main]
use std::borrow::Cow;
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsondrop::{DEFAULT_MAX_DEPTH, MatchMode, RemoveOptions, Remover, validate};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag + 4-byte path seed

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[b"", b" ", b"  ", b"\t", b"\n", b"\r\n", b"\n    "];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);
        data[1..5].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let doc = loop {
            let s = with_rng(|rng| rng.random_range(16..256usize));
            let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
            if let Ok(value) = ArbitraryObject::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
                break spaced(&value.0);
            }
        };

        let len = doc.len().min(max_size - HEADER);
        data[HEADER..HEADER + len].copy_from_slice(&doc[..len]);
        HEADER + len
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Serializes `value` compactly, then sprinkles JSON whitespace after every
/// structural character outside strings.
fn spaced(value: &Value) -> Vec<u8> {
    let compact = serde_json::to_vec(value).expect("Failed to serialize arbitrary value");
    let mut out = Vec::with_capacity(compact.len() * 2);
    let (mut in_string, mut escaped) = (false, false);
    for &b in &compact {
        out.push(b);
        if in_string {
            match (escaped, b) {
                (true, _) => escaped = false,
                (false, b'\\') => escaped = true,
                (false, b'"') => in_string = false,
                _ => {}
            }
        } else if b == b'"' {
            in_string = true;
        } else if matches!(b, b'{' | b'[' | b',' | b':') {
            out.extend_from_slice(with_rng(|rng| WS_TABLE[rng.random_range(0..WS_TABLE.len())]));
        }
    }
    out
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => ArbitraryObject::arbitrary(u)?.0,
        };
        Ok(ArbitraryValue(value))
    }
}

/// Removal only applies to documents whose top-level value is an object.
#[derive(Debug)]
struct ArbitraryObject(Value);

impl<'a> Arbitrary<'a> for ArbitraryObject {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
        Ok(ArbitraryObject(Value::Object(Map::from_iter(
            m.into_iter().map(|(k, v)| (k, v.0)),
        ))))
    }
}

/// Walks objects from the root, choosing one key per level from `seed`.
fn pick_path(value: &Value, mut seed: u32) -> Vec<String> {
    let mut path = Vec::new();
    let mut cur = value;
    while let Value::Object(map) = cur {
        if map.is_empty() {
            break;
        }
        let (key, next) = map.iter().nth(seed as usize % map.len()).unwrap();
        path.push(key.clone());
        seed /= 7;
        if seed % 3 == 0 {
            break;
        }
        cur = next;
    }
    if path.is_empty() {
        path.push("a".into());
    }
    path
}

fn remove(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }

    let flags = data[0];
    let seed = u32::from_le_bytes(data[1..5].try_into().unwrap());
    let doc = &data[HEADER..];

    let decoded = serde_json::from_slice::<Value>(doc).ok();
    let path = decoded
        .as_ref()
        .map_or_else(|| vec!["a".to_string()], |value| pick_path(value, seed));

    let remover = Remover::new(RemoveOptions {
        match_mode: if flags & 1 == 0 {
            MatchMode::Direct
        } else {
            MatchMode::Descendant
        },
        ..Default::default()
    });

    match remover.remove(doc, &path) {
        Err(_) => assert!(validate(doc, DEFAULT_MAX_DEPTH).is_err()),
        Ok(Cow::Borrowed(out)) => assert_eq!(out, doc),
        Ok(Cow::Owned(out)) => {
            assert!(out.len() < doc.len());
            assert!(validate(&out, DEFAULT_MAX_DEPTH).is_ok());
            if decoded.is_some() {
                serde_json::from_slice::<Value>(&out).expect("removal broke a valid document");
            }
        }
    }
}

fuzz_target!(|data: &[u8]| remove(data));
