use tagged_json::{parse, value::Value};

#[test]
fn parse_basics() {
    let data = r#"
    {
        "hello": "world",
        "vec": [
            {
        "num1": 1,
        "num2": 1.2,
        "num3": 1.2e12,
        "num4": -12
    }
        ],
    "is": false,
    "is_not": true,
    "empty": null
    }
    "#;

    let parsed = parse(data).unwrap();

    let object = parsed.unwrap_object();

    assert_eq!(object.len(), 5);
    assert_eq!(parsed.get("hello").unwrap().unwrap_string(), "world");
    assert!(!parsed.get("is").unwrap().unwrap_bool());
    assert!(parsed.get("is_not").unwrap().unwrap_bool());
    parsed.get("empty").unwrap().unwrap_null();

    let inner = &parsed.get("vec").unwrap().unwrap_array()[0];

    assert_eq!(inner.get("num1"), Some(&Value::UInt32(1)));
    assert_eq!(inner.get("num2"), Some(&Value::Float(1.2)));
    assert_eq!(inner.get("num3"), Some(&Value::Float(1.2e12)));
    assert_eq!(inner.get("num4"), Some(&Value::Int32(-12)));
}

mod scalars {
    use tagged_json::{parse, value::Value};

    #[test]
    fn keywords() {
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse("false").unwrap(), Value::Bool(false));
        assert_eq!(parse("null").unwrap(), Value::Null);
    }

    #[test]
    fn string_is_taken_verbatim() {
        let parsed = parse(r#""foo\u0000bar""#).unwrap();

        assert_eq!(parsed.unwrap_string(), r#"foo\u0000bar"#);
    }

    #[test]
    fn backslash_quote_ends_the_string() {
        let parsed = parse(r#"["a\"b"]"#).unwrap();

        assert_eq!(parsed, Value::Array(vec![Value::String("a\\".into())]));
    }

    #[test]
    fn leading_whitespace_and_trailing_characters() {
        assert_eq!(parse(" \n\t 12 ").unwrap(), Value::UInt32(12));
        assert_eq!(parse("[1] xyz").unwrap(), Value::Array(vec![Value::UInt32(1)]));
    }
}

mod numbers {
    use tagged_json::{
        parse,
        value::{Tag, Value},
    };
    use test_case::test_case;

    #[test_case("42", Value::UInt32(42) ; "short unsigned")]
    #[test_case("-42", Value::Int32(-42) ; "short signed")]
    #[test_case("123456789012", Value::UInt64(123_456_789_012) ; "twelve digits")]
    #[test_case("-12345678901", Value::Int64(-12_345_678_901) ; "eleven digits after the sign")]
    #[test_case("4294967295", Value::UInt32(u32::MAX) ; "ten characters stay narrow")]
    #[test_case("-2147483648", Value::Int64(-2_147_483_648) ; "eleven characters go wide")]
    #[test_case("10000000000", Value::UInt64(10_000_000_000) ; "span counts zeros")]
    #[test_case("0", Value::UInt32(0) ; "zero")]
    #[test_case("-0", Value::Int32(0) ; "negative zero")]
    #[test_case("+7", Value::UInt32(7) ; "plus sign")]
    #[test_case("1e5", Value::UInt32(1) ; "exponent without fraction")]
    #[test_case("4294967296", Value::UInt32(0) ; "ten characters keep the low bits")]
    #[test_case("9999999999", Value::UInt32(1_410_065_407) ; "ten nines wrap")]
    #[test_case("-999999999", Value::Int32(-999_999_999) ; "ten characters signed")]
    #[test_case("99999999999999999999", Value::UInt64(u64::MAX) ; "unsigned saturates")]
    #[test_case("-99999999999999999999", Value::Int64(i64::MIN) ; "signed saturates")]
    #[test_case("-9223372036854775808", Value::Int64(i64::MIN) ; "smallest signed")]
    fn integer_width(text: &str, expected: Value) {
        assert_eq!(parse(text).unwrap(), expected);
    }

    #[test_case("1.1234567", Tag::Float ; "seven fraction digits")]
    #[test_case("1.12345678", Tag::Double ; "eight fraction digits")]
    #[test_case("0.5", Tag::Float ; "leading zero")]
    #[test_case("-3.141592653589793", Tag::Double ; "negative double")]
    #[test_case("2.", Tag::Float ; "empty fraction")]
    fn fraction_width(text: &str, expected: Tag) {
        assert_eq!(parse(text).unwrap().tag(), expected);
    }

    #[test]
    fn fraction_values() {
        assert_eq!(parse("0.5").unwrap(), Value::Float(0.5));
        assert_eq!(parse("-2.5E2").unwrap(), Value::Float(-250.0));
        assert_eq!(parse("1.5e").unwrap(), Value::Float(1.5));
        assert_eq!(parse("0.125000000").unwrap(), Value::Double(0.125));
    }

    #[test]
    fn numbers_inside_arrays() {
        let parsed = parse("[10, 0, -1, 0.25]").unwrap();

        assert_eq!(
            parsed,
            Value::Array(vec![
                Value::UInt32(10),
                Value::UInt32(0),
                Value::Int32(-1),
                Value::Float(0.25),
            ])
        );
    }
}

mod arrays {
    use tagged_json::{parse, value::Value};

    fn uints(values: &[u32]) -> Value {
        Value::Array(values.iter().copied().map(Value::UInt32).collect())
    }

    #[test]
    fn flat() {
        assert_eq!(parse("[1,2,3]").unwrap(), uints(&[1, 2, 3]));
        assert_eq!(parse("[ 1 , 2 ,\n 3 ]").unwrap(), uints(&[1, 2, 3]));
    }

    #[test]
    fn empty() {
        assert_eq!(parse("[]").unwrap(), uints(&[]));
        assert_eq!(parse("[ ]").unwrap(), uints(&[]));
    }

    #[test]
    fn trailing_and_doubled_commas() {
        assert_eq!(parse("[1,2,]").unwrap(), uints(&[1, 2]));
        assert_eq!(parse("[1,,2]").unwrap(), uints(&[1, 2]));
    }

    #[test]
    fn invalid_tokens_are_skipped() {
        assert_eq!(parse("[1, x, 2]").unwrap(), uints(&[1, 2]));
        assert_eq!(parse("[@@@]").unwrap(), uints(&[]));
    }

    #[test]
    fn skipping_stops_before_the_next_value() {
        assert_eq!(parse("[x\t2]").unwrap(), uints(&[2]));
        assert_eq!(parse("[x\r\n2]").unwrap(), uints(&[2]));
        assert_eq!(parse("[@[1], 2]").unwrap(), Value::Array(vec![uints(&[1]), Value::UInt32(2)]));
        assert_eq!(parse(r#"[@"a"]"#).unwrap(), Value::Array(vec!["a".into()]));

        let parsed = parse(r#"[@{"a":1}, 3]"#).unwrap();

        assert_eq!(parsed.unwrap_array()[0].get("a"), Some(&Value::UInt32(1)));
        assert_eq!(parsed.unwrap_array()[1], Value::UInt32(3));
    }

    #[test]
    fn nested() {
        let parsed = parse(r#"[[1], [2, [3]], {"a": []}]"#).unwrap();
        let array = parsed.unwrap_array();

        assert_eq!(array.len(), 3);
        assert_eq!(array[0], uints(&[1]));
        assert_eq!(array[1].unwrap_array()[1], uints(&[3]));
        assert_eq!(array[2].get("a"), Some(&uints(&[])));
    }

    #[test]
    fn mixed_scalars() {
        let parsed = parse(r#"["a", true, false, null, -5]"#).unwrap();

        assert_eq!(
            parsed,
            Value::Array(vec![
                "a".into(),
                true.into(),
                false.into(),
                Value::Null,
                Value::Int32(-5),
            ])
        );
    }
}

mod objects {
    use tagged_json::{parse, value::Value};

    #[test]
    fn keeps_insertion_order() {
        let parsed = parse(r#"{"b":1,"a":2}"#).unwrap();

        let keys: Vec<&str> = parsed.unwrap_object().keys().map(Value::unwrap_string).collect();

        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn last_duplicate_wins() {
        let parsed = parse(r#"{"x":1,"x":2}"#).unwrap();

        assert_eq!(parsed.unwrap_object().len(), 1);
        assert_eq!(parsed.get("x"), Some(&Value::UInt32(2)));
    }

    #[test]
    fn empty() {
        assert!(parse("{}").unwrap().unwrap_object().is_empty());
        assert!(parse("{ }").unwrap().unwrap_object().is_empty());
    }

    #[test]
    fn trailing_comma() {
        let parsed = parse(r#"{"a": 1, }"#).unwrap();

        assert_eq!(parsed.get("a"), Some(&Value::UInt32(1)));
    }

    #[test]
    fn key_without_a_valid_value_is_dropped() {
        let parsed = parse(r#"{"a": x, "b": 1}"#).unwrap();

        assert_eq!(parsed.get("a"), None);
        assert_eq!(parsed.get("b"), Some(&Value::UInt32(1)));

        let parsed = parse(r#"{"a":}"#).unwrap();

        assert!(parsed.unwrap_object().is_empty());
    }

    #[test]
    fn nested() {
        let parsed = parse(r#"{"outer": {"inner": [true, {"deep": null}]}}"#).unwrap();

        let inner = parsed.get("outer").unwrap().get("inner").unwrap();

        assert_eq!(inner.unwrap_array()[0], Value::Bool(true));
        assert_eq!(inner.unwrap_array()[1].get("deep"), Some(&Value::Null));
    }
}

mod options {
    use tagged_json::{
        error::Kind,
        options::{Keywords, ParseOptions},
        value::Value,
        Parser,
    };

    #[test]
    fn exact_keywords_by_default() {
        assert_eq!(ParseOptions::default().keywords, Keywords::Exact);

        let error = Parser::default().parse("[tru]").unwrap_err();

        assert_eq!(error.kind, Kind::InvalidValue("tru".into()));
    }

    #[test]
    fn permissive_keywords() {
        let parser = Parser::new(ParseOptions::new().permissive_keywords());

        let parsed = parser.parse("[ture, fasle, nlul, true]").unwrap();

        assert_eq!(
            parsed,
            Value::Array(vec![
                Value::Bool(true),
                Value::Bool(false),
                Value::Null,
                Value::Bool(true),
            ])
        );
    }

    #[test]
    fn max_depth() {
        let parser = Parser::new(ParseOptions::new().max_depth(2));

        assert!(parser.parse("[[1]]").is_ok());
        assert!(parser.parse(r#"{"a": [1]}"#).is_ok());

        let error = parser.parse("[[[1]]]").unwrap_err();

        assert_eq!(error.kind, Kind::DepthLimitExceeded(2));
    }
}

mod errors {
    use tagged_json::{error::Kind, parse, parse_bytes, value::Value, INVALID_JSON};

    #[test]
    fn missing_colon() {
        let error = parse(r#"{"a" 1}"#).unwrap_err();

        assert_eq!(error.kind, Kind::MissingColon);
        assert!(error.is_malformed());
    }

    #[test]
    fn error_position() {
        let error = parse("{\n  \"a\" 1\n}").unwrap_err();

        assert_eq!(error.position.line, 2);
        assert_eq!(error.position.col, 7);
        assert_eq!(
            error.to_string(),
            "missing colon after object key at line 2, column 7"
        );
    }

    #[test]
    fn mismatched_delimiters() {
        assert_eq!(
            parse("[1}").unwrap_err().kind,
            Kind::MismatchedDelimiter {
                expected: ']',
                found: '}'
            }
        );
        assert_eq!(
            parse(r#"{"a":1]"#).unwrap_err().kind,
            Kind::MismatchedDelimiter {
                expected: '}',
                found: ']'
            }
        );
    }

    #[test]
    fn truncated_input() {
        for text in [
            "[1, 2",
            "[1,",
            "[1, ",
            r#"{"a": 1"#,
            "{",
            "{ ",
            "{\"a\":1, ",
            "{\"a\":1,\n",
        ] {
            assert_eq!(parse(text).unwrap_err().kind, Kind::UnexpectedEnd, "{}", text);
        }

        assert_eq!(parse(r#"["abc"#).unwrap_err().kind, Kind::MissingQuote);
    }

    #[test]
    fn invalid_key() {
        assert_eq!(
            parse("{1: 2}").unwrap_err().kind,
            Kind::InvalidKey("1".into())
        );
    }

    #[test]
    fn invalid_numbers() {
        for text in ["[-]", "[+]", "[-e5]", "[+.]"] {
            assert!(
                matches!(parse(text).unwrap_err().kind, Kind::InvalidNumber(_)),
                "{}",
                text
            );
        }
    }

    #[test]
    fn unterminated_value_string() {
        let error = parse(r#"{"a": "b"#).unwrap_err();

        assert_eq!(error.kind, Kind::MissingQuote);
        assert_eq!(error.position.offset, 7);
    }

    #[test]
    fn root_without_a_value() {
        assert_eq!(parse("x").unwrap(), Value::String(INVALID_JSON.into()));
        assert_eq!(parse("  }").unwrap(), Value::String(INVALID_JSON.into()));
    }

    #[test]
    fn empty_input() {
        let error = parse("").unwrap_err();

        assert_eq!(error.kind, Kind::EmptyInput);
        assert!(!error.is_malformed());
    }

    #[test]
    fn bytes() {
        assert_eq!(
            parse_bytes(b"[1]").unwrap(),
            Value::Array(vec![Value::UInt32(1)])
        );

        let error = parse_bytes(b"[\"\xff\"]").unwrap_err();

        assert_eq!(error.kind, Kind::InvalidUtf8);
        assert_eq!(error.position.offset, 2);
    }
}
