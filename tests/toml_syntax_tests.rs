//! Conformance tests for the TOML grammar, grouped by language feature.
//!
//! Valid documents are checked for the values they produce; invalid ones for the
//! region the error points at.

use toml_tree::{parse, Date, IntegerBase, Node, ParseError, SourcePosition, Table, Time};

fn valid(input: &str) -> Table {
    match parse(input) {
        Ok(table) => table,
        Err(err) => panic!("expected {:?} to parse, got: {}", input, err),
    }
}

fn invalid(input: &str) -> ParseError {
    match parse(input) {
        Ok(table) => panic!("expected {:?} to fail, got: {:?}", input, table),
        Err(err) => err,
    }
}

fn at(line: usize, column: usize) -> SourcePosition {
    SourcePosition::new(line, column)
}

mod keys {
    use super::*;

    #[test]
    fn bare_quoted_and_dotted() {
        let doc = valid(
            "key = 1\nbare_key-2 = 2\n1234 = 3\n\"127.0.0.1\" = 4\n'quoted \"value\"' = 5\n\
             site.\"google.com\" = true\nfruit . color = 'yellow'\n\"\" = 'empty'",
        );
        assert!(doc.contains_key("1234"));
        assert!(doc.contains_key("127.0.0.1"));
        assert!(doc.contains_key("quoted \"value\""));
        assert!(doc.contains_key(""));
        let site = doc.get("site").and_then(Node::as_table).unwrap();
        assert_eq!(site.get("google.com").and_then(Node::as_bool), Some(true));
        let fruit = doc.get("fruit").and_then(Node::as_table).unwrap();
        assert_eq!(fruit.get("color").and_then(Node::as_str), Some("yellow"));
    }

    #[test]
    fn dotted_keys_extend_dotted_tables() {
        let doc = valid("apple.type = 'fruit'\norange.type = 'fruit'\napple.skin = 'thin'");
        let apple = doc.get("apple").and_then(Node::as_table).unwrap();
        assert_eq!(apple.len(), 2);
    }

    #[test]
    fn duplicate_keys() {
        let err = invalid("name = 'Tom'\nname = 'Pradyun'");
        assert_eq!(err.region().begin, at(2, 1));
        assert_eq!(err.region().end, at(2, 5));

        let err = invalid("spelling = 'favorite'\n\"spelling\" = 'favourite'");
        assert!(err.description().contains("duplicate key 'spelling'"));
    }

    #[test]
    fn dotted_key_over_value() {
        let err = invalid("fruit.apple = 1\nfruit.apple.smooth = true");
        assert_eq!(err.region().begin, at(2, 7));
        assert_eq!(err.region().end, at(2, 12));
    }

    #[test]
    fn missing_key() {
        let err = invalid("= 'no key'");
        assert_eq!(err.region().begin, at(1, 1));
        assert_eq!(err.region().end, at(1, 2));
    }

    #[test]
    fn missing_equals() {
        let err = invalid("key 'value'");
        assert_eq!(err.region().begin, at(1, 5));
        assert!(err.description().contains("expected '='"));
    }

    #[test]
    fn multiline_string_key() {
        assert!(parse("\"\"\"key\"\"\" = 1").is_err());
    }
}

mod values {
    use super::*;

    #[test]
    fn missing_value_points_after_equals() {
        let err = invalid("key = \n");
        assert_eq!(err.region().begin, at(1, 6));
        assert_eq!(err.region().end, at(1, 7));

        let err = invalid("key =");
        assert_eq!(err.region().begin, at(1, 6));
        assert_eq!(err.region().end, at(1, 6));
    }

    #[test]
    fn unknown_bare_value() {
        let err = invalid("key = nope");
        assert_eq!(err.region().begin, at(1, 7));
        assert_eq!(err.region().end, at(1, 11));

        let err = invalid("key = @");
        assert_eq!(err.region().begin, at(1, 7));
        assert_eq!(err.region().end, at(1, 8));
    }

    #[test]
    fn bad_number_covers_token() {
        let err = invalid("a = 1\nb = 0x_ff # comment");
        assert_eq!(err.region().begin, at(2, 5));
        assert_eq!(err.region().end, at(2, 10));
    }

    #[test]
    fn trailing_garbage() {
        let err = invalid("first = \"Tom\" last = \"Preston-Werner\"");
        assert_eq!(err.region().begin, at(1, 15));
    }

    #[test]
    fn integer_bases_are_recorded() {
        let doc = valid("dec = 1_000\nhex = 0xdead_BEEF\noct = 0o01234567\nbin = 0b11010110");
        let base = |key: &str| doc.get(key).and_then(Node::as_integer).unwrap().base();
        assert_eq!(base("dec"), IntegerBase::Decimal);
        assert_eq!(base("hex"), IntegerBase::Hexadecimal);
        assert_eq!(base("oct"), IntegerBase::Octal);
        assert_eq!(base("bin"), IntegerBase::Binary);
        assert_eq!(doc.get("bin").and_then(Node::as_i64), Some(214));
    }

    #[test]
    fn integer_overflow() {
        assert!(parse("big = 9_223_372_036_854_775_807").is_ok());
        assert!(parse("big = 9_223_372_036_854_775_808").is_err());
        assert!(parse("big = 0x8000000000000000").is_err());
    }

    #[test]
    fn special_floats() {
        let doc = valid("a = +inf\nb = -inf\nc = +nan\nd = -nan");
        assert_eq!(doc.get("a").and_then(Node::as_float), Some(f64::INFINITY));
        assert_eq!(doc.get("b").and_then(Node::as_float), Some(f64::NEG_INFINITY));
        assert!(doc.get("d").and_then(Node::as_float).unwrap().is_nan());
    }

    #[test]
    fn dates_and_times() {
        let doc = valid(
            "odt1 = 1979-05-27T07:32:00Z\nodt2 = 1979-05-27T00:32:00-07:00\n\
             ldt = 1979-05-27 07:32:00.999999\nld = 1979-05-27\nlt = 00:32:00.999999",
        );
        assert_eq!(doc.get("ld").and_then(Node::as_date), Some(Date::new(1979, 5, 27)));
        assert_eq!(
            doc.get("lt").and_then(Node::as_time),
            Some(Time::new(0, 32, 0, 999_999_000))
        );
        let ldt = doc.get("ldt").and_then(Node::as_date_time).unwrap();
        assert!(ldt.is_local());
        assert_eq!(ldt.to_string(), "1979-05-27T07:32:00.999999");
    }

    #[test]
    fn invalid_calendar_dates() {
        let err = invalid("d = 2021-02-29");
        assert_eq!(err.region().begin, at(1, 5));
        assert_eq!(err.region().end, at(1, 15));
        assert!(parse("d = 2000-02-29").is_ok());
        assert!(parse("d = 1900-02-29").is_err());
        assert!(parse("d = 2021-04-31").is_err());
    }
}

mod strings {
    use super::*;

    #[test]
    fn all_four_kinds() {
        let doc = valid(concat!(
            "basic = \"I'm a string. \\\"You can quote me\\\". Name\\tJos\\u00E9\"\n",
            "literal = 'C:\\Users\\nodejs'\n",
            "ml_basic = \"\"\"\nRoses are red\nViolets are blue\"\"\"\n",
            "ml_literal = '''\nThe first newline is\ntrimmed.\n'''\n",
        ));
        assert_eq!(
            doc.get("basic").and_then(Node::as_str),
            Some("I'm a string. \"You can quote me\". Name\tJosé")
        );
        assert_eq!(doc.get("literal").and_then(Node::as_str), Some("C:\\Users\\nodejs"));
        assert_eq!(
            doc.get("ml_basic").and_then(Node::as_str),
            Some("Roses are red\nViolets are blue")
        );
        assert_eq!(
            doc.get("ml_literal").and_then(Node::as_str),
            Some("The first newline is\ntrimmed.\n")
        );
    }

    #[test]
    fn line_ending_backslash() {
        let doc = valid("s = \"\"\"\\\n    The quick brown \\\n    fox.\\\n    \"\"\"");
        assert_eq!(doc.get("s").and_then(Node::as_str), Some("The quick brown fox."));
    }

    #[test]
    fn crlf_in_multiline_becomes_lf() {
        let doc = valid("s = \"\"\"\r\na\r\nb\"\"\"\r\n");
        assert_eq!(doc.get("s").and_then(Node::as_str), Some("a\nb"));
    }

    #[test]
    fn invalid_escape() {
        let err = invalid("s = \"bad \\x41\"");
        assert_eq!(err.region().begin, at(1, 10));
        assert_eq!(err.region().end, at(1, 12));
    }

    #[test]
    fn unterminated() {
        let err = invalid("s = 'open\nt = 1");
        assert_eq!(err.region().begin, at(1, 5));
        assert_eq!(err.region().end, at(1, 10));

        let err = invalid("s = \"\"\"never closed\n\nt = 1");
        assert_eq!(err.region().begin, at(1, 5));
        assert_eq!(err.region().end, at(3, 6));
    }

    #[test]
    fn raw_control_characters() {
        let err = invalid("s = \"a\u{1}b\"");
        assert_eq!(err.region().begin, at(1, 7));
        assert!(parse("s = \"tab\tok\"").is_ok());
    }
}

mod arrays {
    use super::*;

    #[test]
    fn mixed_and_multiline() {
        let doc = valid(
            "numbers = [ 0.1, 0.2, 0.5, 1, 2, 5 ]\n\
             contributors = [\n  \"Foo Bar <foo@example.com>\",\n  \
             { name = \"Baz Qux\", email = \"bazqux@example.com\" },\n]\n",
        );
        let numbers = doc.get("numbers").and_then(Node::as_array).unwrap();
        assert!(!numbers.is_homogeneous());
        let contributors = doc.get("contributors").and_then(Node::as_array).unwrap();
        assert_eq!(contributors.len(), 2);
    }

    #[test]
    fn missing_separator() {
        let err = invalid("a = [1 2]");
        assert_eq!(err.region().begin, at(1, 8));
        assert_eq!(err.region().end, at(1, 9));
    }

    #[test]
    fn unterminated() {
        let err = invalid("a = [1, 2");
        assert_eq!(err.region().begin, at(1, 5));
        assert_eq!(err.region().end, at(1, 10));
    }

    #[test]
    fn leading_comma() {
        assert!(parse("a = [,1]").is_err());
        assert!(parse("a = [1,,2]").is_err());
    }
}

mod inline_tables {
    use super::*;

    #[test]
    fn nested() {
        let doc = valid("animal = { type.name = \"pug\" }\npoint = { x = 1, y = { z = 2 } }");
        let animal = doc.get("animal").and_then(Node::as_table).unwrap();
        let kind = animal.get("type").and_then(Node::as_table).unwrap();
        assert!(kind.is_inline());
        assert_eq!(kind.get("name").and_then(Node::as_str), Some("pug"));
    }

    #[test]
    fn sealed_after_definition() {
        let err = invalid("[product]\ntype = { name = \"Nail\" }\ntype.edible = false");
        assert_eq!(err.region().begin, at(3, 1));
        assert_eq!(err.region().end, at(3, 5));

        assert!(parse("[product]\ntype.name = \"Nail\"\ntype = { edible = false }").is_err());
    }

    #[test]
    fn newline_inside() {
        let err = invalid("t = { a = 1,\nb = 2 }");
        assert_eq!(err.region().begin, at(1, 13));
    }

    #[test]
    fn trailing_comma() {
        let err = invalid("t = { a = 1, }");
        assert_eq!(err.region().begin, at(1, 14));
    }
}

mod tables {
    use super::*;

    #[test]
    fn headers_with_whitespace_and_quotes() {
        let doc = valid("[ j . \"ʞ\" . 'l' ]\nkey = 1\n[dog.\"tater.man\"]\ntype.name = \"pug\"");
        let j = doc.get("j").and_then(Node::as_table).unwrap();
        let k = j.get("ʞ").and_then(Node::as_table).unwrap();
        assert!(k.contains_key("l"));
        let dog = doc.get("dog").and_then(Node::as_table).unwrap();
        assert!(dog.contains_key("tater.man"));
    }

    #[test]
    fn implicit_then_explicit() {
        let doc = valid("[x.y.z.w]\na = 1\n[x]\nb = 2");
        let x = doc.get("x").and_then(Node::as_table).unwrap();
        assert_eq!(x.keys().map(String::as_str).collect::<Vec<_>>(), vec!["y", "b"]);
    }

    #[test]
    fn redefinition() {
        let err = invalid("[fruit]\napple = 'red'\n\n[fruit]\norange = 'orange'");
        assert_eq!(err.region().begin, at(4, 1));
        assert_eq!(err.region().end, at(4, 8));
        assert!(err.description().contains("'fruit'"));
    }

    #[test]
    fn table_over_value() {
        let err = invalid("[fruit]\napple = 'red'\n\n[fruit.apple]\ntexture = 'smooth'");
        assert!(err.description().contains("fruit.apple"));
        assert_eq!(err.region().begin, at(4, 1));
    }

    #[test]
    fn header_through_scalar() {
        let err = invalid("a = 1\n[a.b]");
        assert_eq!(err.region().begin, at(2, 2));
        assert_eq!(err.region().end, at(2, 3));
    }

    #[test]
    fn unclosed_header() {
        let err = invalid("[a\nb = 1");
        assert_eq!(err.region().begin, at(1, 3));
    }

    #[test]
    fn header_followed_by_value() {
        assert!(parse("[a] b = 1").is_err());
    }
}

mod arrays_of_tables {
    use super::*;

    #[test]
    fn nested_sub_tables() {
        let doc = valid(
            "[[fruits]]\nname = \"apple\"\n\n[fruits.physical]\ncolor = \"red\"\n\n\
             [[fruits.varieties]]\nname = \"red delicious\"\n\n[[fruits.varieties]]\n\
             name = \"granny smith\"\n\n[[fruits]]\nname = \"banana\"\n\n\
             [[fruits.varieties]]\nname = \"plantain\"",
        );
        let fruits = doc.get("fruits").and_then(Node::as_array).unwrap();
        assert_eq!(fruits.len(), 2);
        let apple = fruits.get(0).and_then(Node::as_table).unwrap();
        let varieties = apple.get("varieties").and_then(Node::as_array).unwrap();
        assert_eq!(varieties.len(), 2);
        let banana = fruits.get(1).and_then(Node::as_table).unwrap();
        assert_eq!(
            banana.get("varieties").and_then(Node::as_array).map(|a| a.len()),
            Some(1)
        );
        assert_eq!(parse(&doc.to_toml()).unwrap(), doc);
    }

    #[test]
    fn static_array_is_sealed() {
        let err = invalid("fruits = []\n\n[[fruits]]");
        assert_eq!(err.region().begin, at(3, 1));
        assert_eq!(err.region().end, at(3, 11));
    }

    #[test]
    fn table_then_array_of_tables() {
        assert!(parse("[[fruits]]\nname = 'a'\n[fruits]").is_err());
        assert!(parse("[fruits]\n[[fruits]]").is_err());
    }

    #[test]
    fn sub_table_of_element_defined_twice() {
        assert!(parse("[[a]]\n[a.b]\n[a.b]").is_err());
        assert!(parse("[[a]]\n[a.b]\n[[a]]\n[a.b]").is_ok());
    }
}

mod whitespace_and_comments {
    use super::*;

    #[test]
    fn comments_everywhere() {
        let doc = valid(
            "# full line\nkey = \"value\"  # end of line\n[table] # header\n\
             array = [ # open\n  1, # one\n  # alone\n  2 # two\n] # close\n",
        );
        let table = doc.get("table").and_then(Node::as_table).unwrap();
        assert_eq!(table.get("array").and_then(Node::as_array).map(|a| a.len()), Some(2));
    }

    #[test]
    fn byte_order_mark_is_skipped() {
        let doc = valid("\u{feff}a = 1");
        assert_eq!(doc.get("a").and_then(Node::as_i64), Some(1));
        let err = invalid("\u{feff}a = ");
        assert_eq!(err.region().begin, at(1, 4));
    }

    #[test]
    fn columns_count_characters() {
        let err = invalid("\"ключ\" = 1\n\"ключ\" = 2");
        assert_eq!(err.region().begin, at(2, 1));
        assert_eq!(err.region().end, at(2, 7));
    }

    #[test]
    fn empty_document() {
        assert!(valid("").is_empty());
        assert!(valid("\n\n# nothing\n").is_empty());
    }
}
