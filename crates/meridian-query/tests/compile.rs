//! End-to-end source-to-query tests.

use meridian_query::{compile, CompileError, RenderError};
use test_case::test_case;

// ============================================================================
// Whole scripts
// ============================================================================

#[test]
fn compiles_a_cafe_search_script() {
    let source = r#"
def cafes():
    search = Area(3600134503)
    cafes = Node(search, amenity="cafe")
    out(cafes, geom=True)
"#;
    let expected = "\
(area(3600134503);) -> .search;
(node[amenity=\"cafe\"](area.search);) -> .cafes;
.cafes out geom;";
    assert_eq!(compile(source).unwrap(), expected);
}

#[test]
fn compiles_union_and_difference_of_sets() {
    let source = "\
a = Node(amenity=\"cafe\")
b = Node(amenity=\"bar\")
both = a + b
only = a - b
out(both, ids=True)";
    let expected = "\
(node[amenity=\"cafe\"];) -> .a;
(node[amenity=\"bar\"];) -> .b;
((.a; .b);) -> .both;
((.a - .b;);) -> .only;
.both out ids;";
    assert_eq!(compile(source).unwrap(), expected);
}

#[test]
fn compiles_bare_statements_without_a_def_header() {
    assert_eq!(
        compile("out(Way(123), body=True)").unwrap(),
        "way(123) out body;"
    );
}

#[test]
fn compiles_grouped_sets_and_intersections() {
    let source = "\
towns = Set(Node(place='town'), Node(place='village'))
named = towns.intersect(a, b)
out(named)";
    let expected = "\
((node[place=\"town\"]; node[place=\"village\"]);) -> .towns;
(towns.a.b;) -> .named;
.named out ;";
    assert_eq!(compile(source).unwrap(), expected);
}

#[test]
fn count_channel_always_leads_the_output() {
    assert_eq!(
        compile("out(geom=True, count=True)").unwrap(),
        "._ out count;\n._ out geom;"
    );
}

#[test]
fn compiling_twice_is_byte_identical() {
    let source = "out(Node(1), count=True, ids=True, geom=True)";
    assert_eq!(compile(source).unwrap(), compile(source).unwrap());
}

// ============================================================================
// Locator permutations
// ============================================================================

#[test_case("Node(123)", "node(123)" ; "node by id")]
#[test_case("Way(9223372036854775807)", "way(9223372036854775807)" ; "way by largest id")]
#[test_case("Area(region)", "area(area.region)" ; "area by reference")]
#[test_case("Node()", "node" ; "bare node")]
#[test_case("Way(highway='primary')", "way[highway=\"primary\"]" ; "filtered way")]
#[test_case("Node(region, amenity=\"cafe\")", "node[amenity=\"cafe\"](area.region)" ; "filtered node in area")]
#[test_case("wayset.intersect(a)", "way.a" ; "intersect chain")]
#[test_case("Way.filter(a)", "way.a" ; "filter chain")]
fn locator_statement(source: &str, expected: &str) {
    assert_eq!(compile(source).unwrap(), expected);
}

// ============================================================================
// Snapshots
// ============================================================================

#[test]
fn snapshot_filtered_locator() {
    insta::assert_snapshot!(
        compile(r#"Way(amenity="cafe")"#).unwrap(),
        @r#"way[amenity="cafe"]"#
    );
}

#[test]
fn snapshot_assignment_binding() {
    insta::assert_snapshot!(
        compile("x = a + b").unwrap(),
        @"((.a; .b);) -> .x;"
    );
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn rejects_unknown_call_targets() {
    let err = compile("frob(1)").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Render(RenderError::UnknownCallTarget { .. })
    ));
}

#[test]
fn rejects_locators_with_extra_positional_args() {
    let err = compile("Way(1, 2)").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Render(RenderError::TooManyPositionalArguments { .. })
    ));
}

#[test]
fn rejects_malformed_source() {
    let err = compile("a = ").unwrap_err();
    assert!(matches!(err, CompileError::Parse(_)));
}

#[test]
fn a_failing_statement_fails_the_whole_program() {
    let source = "a = Node(1)\nfrob(2)\nout(a)";
    assert!(compile(source).is_err());
}
