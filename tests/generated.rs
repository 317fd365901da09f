//! Randomly generated documents checked against the model they were built
//! from, plus random corruptions of them that must fail cleanly.

use oorandom::Rand32;
use toml_combinator::{Table, Value};

#[derive(Clone, Debug)]
enum Expected {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Array(Vec<Expected>),
    Table(Vec<(String, Expected)>),
}

fn verify_table(actual: &Table, expected: &[(String, Expected)], path: &str) {
    assert_eq!(actual.len(), expected.len(), "{path}: table length mismatch");
    for (key, exp) in expected {
        let child = if path.is_empty() {
            key.clone()
        } else {
            format!("{path}.{key}")
        };
        let value = actual
            .get(key)
            .unwrap_or_else(|| panic!("{child}: missing key"));
        verify_value(value, exp, &child);
    }
}

fn verify_value(actual: &Value, expected: &Expected, path: &str) {
    match expected {
        Expected::Integer(exp) => assert_eq!(actual.as_integer(), Some(*exp), "{path}"),
        Expected::Float(exp) => assert_eq!(actual.as_float(), Some(*exp), "{path}"),
        Expected::Bool(exp) => assert_eq!(actual.as_bool(), Some(*exp), "{path}"),
        Expected::Str(exp) => assert_eq!(actual.as_str(), Some(exp.as_str()), "{path}"),
        Expected::Array(exp) => {
            let arr = actual
                .as_array()
                .unwrap_or_else(|| panic!("{path}: expected array, got {}", actual.type_str()));
            assert_eq!(arr.len(), exp.len(), "{path}: array length mismatch");
            for (i, (value, exp)) in arr.iter().zip(exp).enumerate() {
                verify_value(value, exp, &format!("{path}[{i}]"));
            }
        }
        Expected::Table(exp) => {
            let table = actual
                .as_table()
                .unwrap_or_else(|| panic!("{path}: expected table, got {}", actual.type_str()));
            verify_table(table, exp, path);
        }
    }
}

fn pick<'a, T>(rng: &mut Rand32, items: &'a [T]) -> &'a T {
    &items[rng.rand_range(0..items.len() as u32) as usize]
}

fn gen_word(rng: &mut Rand32) -> String {
    let len = rng.rand_range(1..16);
    let pool = b"abcdefghijklmnopqrstuvwxyz0123456789";
    (0..len).map(|_| *pick(rng, pool) as char).collect()
}

const KEY_BASES: &[&str] = &[
    "name", "cfg", "path", "src", "opt", "val", "item", "data", "meta", "port", "host", "mode",
];

/// Returns the key as written in TOML and as it should be read back. Each
/// `idx` yields a distinct key regardless of the style chosen.
fn gen_key(rng: &mut Rand32, idx: usize) -> (String, String) {
    let base = match idx / KEY_BASES.len() {
        0 => KEY_BASES[idx].to_string(),
        n => format!("{}{n}", KEY_BASES[idx % KEY_BASES.len()]),
    };
    match rng.rand_range(0..6) {
        0 | 1 => (base.clone(), base),
        2 => (format!("\"{base}\""), base),
        3 => (format!("'{base}'"), base),
        4 => (format!("\"{base}\\tx\""), format!("{base}\tx")),
        _ => (format!("\"{base}\\u00E9\""), format!("{base}\u{e9}")),
    }
}

fn gen_scalar(rng: &mut Rand32) -> (String, Expected) {
    match rng.rand_range(0..8) {
        0 => {
            let v = i64::from(rng.rand_i32()) * 1000;
            (v.to_string(), Expected::Integer(v))
        }
        1 => {
            let int = rng.rand_range(0..2000) as i32 - 1000;
            let frac = rng.rand_range(0..100_000);
            let text = format!("{int}.{frac:05}");
            let v = text.parse().expect("valid float");
            (text, Expected::Float(v))
        }
        2 => {
            let v = rng.rand_range(0..2) == 1;
            (v.to_string(), Expected::Bool(v))
        }
        3 => {
            let s = gen_word(rng);
            (format!("\"{s}\""), Expected::Str(s))
        }
        4 => {
            let s = gen_word(rng);
            let (escape, ch) = *pick(rng, &[("\\n", '\n'), ("\\\\", '\\'), ("\\\"", '"'), ("\\x07", '\u{7}')]);
            (format!("\"{s}{escape}\""), Expected::Str(format!("{s}{ch}")))
        }
        5 => {
            let s = gen_word(rng);
            (format!("'{s}'"), Expected::Str(s))
        }
        6 => {
            let s = gen_word(rng);
            (format!("\"\"\"\n{s}\n\"\"\""), Expected::Str(format!("{s}\n")))
        }
        _ => {
            let s = gen_word(rng);
            (format!("'''{s}'''"), Expected::Str(s))
        }
    }
}

fn gen_value(rng: &mut Rand32, depth: usize) -> (String, Expected) {
    if depth == 0 {
        return gen_scalar(rng);
    }
    match rng.rand_range(0..6) {
        0 => gen_inline_table(rng, depth - 1),
        1 => gen_inline_array(rng, depth - 1),
        _ => gen_scalar(rng),
    }
}

fn gen_inline_table(rng: &mut Rand32, depth: usize) -> (String, Expected) {
    let n = rng.rand_range(0..5) as usize;
    let mut parts = Vec::new();
    let mut exp = Vec::new();
    for i in 0..n {
        let (k_toml, k) = gen_key(rng, i);
        let (v_toml, v) = gen_value(rng, depth);
        parts.push(format!("{k_toml} = {v_toml}"));
        exp.push((k, v));
    }
    (format!("{{{}}}", parts.join(", ")), Expected::Table(exp))
}

fn gen_inline_array(rng: &mut Rand32, depth: usize) -> (String, Expected) {
    let n = rng.rand_range(0..6) as usize;
    let mut parts = Vec::new();
    let mut exp = Vec::new();
    for _ in 0..n {
        let (v_toml, v) = gen_value(rng, depth);
        parts.push(v_toml);
        exp.push(v);
    }
    let sep = if rng.rand_range(0..2) == 0 { ", " } else { ",\n  " };
    (format!("[{}]", parts.join(sep)), Expected::Array(exp))
}

/// Writes `n` key/value lines and returns what they define.
fn gen_keyvals(rng: &mut Rand32, toml: &mut String, n: usize) -> Vec<(String, Expected)> {
    let mut exp = Vec::new();
    for i in 0..n {
        let (k_toml, k) = gen_key(rng, i);
        if rng.rand_range(0..5) == 0 {
            let (sub_toml, sub) = gen_key(rng, 0);
            let (v_toml, v) = gen_value(rng, 1);
            toml.push_str(&format!("{k_toml}.{sub_toml} = {v_toml}\n"));
            exp.push((k, Expected::Table(vec![(sub, v)])));
        } else {
            let (v_toml, v) = gen_value(rng, 2);
            let comment = if rng.rand_range(0..4) == 0 { " # note" } else { "" };
            toml.push_str(&format!("{k_toml} = {v_toml}{comment}\n"));
            exp.push((k, v));
        }
    }
    exp
}

fn gen_document(rng: &mut Rand32) -> (String, Vec<(String, Expected)>) {
    let mut toml = String::new();
    let n_root = rng.rand_range(0..6) as usize;
    let mut root = gen_keyvals(rng, &mut toml, n_root);

    // Sections use key indices past the root keys so names never collide.
    let mut idx = n_root;
    for _ in 0..rng.rand_range(0..4) {
        let (k_toml, k) = gen_key(rng, idx);
        idx += 1;
        toml.push('\n');
        match rng.rand_range(0..3) {
            0 => {
                toml.push_str(&format!("[{k_toml}]\n"));
                let n = rng.rand_range(0..5) as usize;
                let body = gen_keyvals(rng, &mut toml, n);
                root.push((k, Expected::Table(body)));
            }
            1 => {
                let (sub_toml, sub) = gen_key(rng, 0);
                toml.push_str(&format!("[{k_toml} . {sub_toml}]\n"));
                let n = rng.rand_range(0..4) as usize;
                let body = gen_keyvals(rng, &mut toml, n);
                root.push((k, Expected::Table(vec![(sub, Expected::Table(body))])));
            }
            _ => {
                let mut elements = Vec::new();
                for _ in 0..rng.rand_range(1..4) {
                    toml.push_str(&format!("[[{k_toml}]]\n"));
                    let n = rng.rand_range(0..4) as usize;
                    elements.push(Expected::Table(gen_keyvals(rng, &mut toml, n)));
                }
                root.push((k, Expected::Array(elements)));
            }
        }
    }
    (toml, root)
}

#[test]
fn generated_documents_parse_to_their_model() {
    let mut rng = Rand32::new(0xdeadbeaf);
    for round in 0..500 {
        let (toml, expected) = gen_document(&mut rng);
        let table = toml_combinator::parse(&toml).unwrap_or_else(|err| {
            panic!("round {round}: failed to parse:\n{toml}\n{err}\n{}", err.rendered)
        });
        verify_table(&table, &expected, "");
    }
}

/// Deletes, duplicates or inserts a few characters.
fn corrupt(rng: &mut Rand32, source: &str) -> String {
    let mut chars: Vec<char> = source.chars().collect();
    let noise = ['[', ']', '{', '}', '"', '\'', '=', ',', '.', '#', '\\', '\n', ' ', 'x', '1'];
    for _ in 0..rng.rand_range(1..4) {
        let at = rng.rand_range(0..chars.len() as u32 + 1) as usize;
        match rng.rand_range(0..3) {
            0 if at < chars.len() => {
                chars.remove(at);
            }
            1 if at < chars.len() => {
                let ch = chars[at];
                chars.insert(at, ch);
            }
            _ => chars.insert(at, *pick(rng, &noise)),
        }
    }
    chars.into_iter().collect()
}

#[test]
fn corrupted_documents_fail_inside_the_input() {
    let mut rng = Rand32::new(0x5eed);
    for _ in 0..2000 {
        let (toml, _) = gen_document(&mut rng);
        let source = corrupt(&mut rng, &toml);
        let Err(err) = toml_combinator::parse(&source) else {
            continue;
        };
        let (start, end) = (err.span.start as usize, err.span.end as usize);
        assert!(start <= end && end <= source.len(), "{source:?}: span {start}..{end}");
        assert!(source.is_char_boundary(start) && source.is_char_boundary(end));
        let (line, _) = err.line_info.expect("parse errors carry a location");
        assert!(line <= source.matches('\n').count(), "{source:?}: line {line}");
        assert!(err.rendered.contains("error\n"), "{}", err.rendered);
    }
}
