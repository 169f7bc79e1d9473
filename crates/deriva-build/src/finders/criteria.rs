//! Derived-name grammar: `<prefix><modifiers>By<criteria>[OrderBy<order>]`.

use crate::context::MatchContext;
use convert_case::{Case, Casing};
use deriva_core::{
    error::ProcessError,
    query::{
        OrderDirection, OrderSpec, QueryModel,
        predicate::{CompareOp, Predicate, QueryParameter},
    },
};
use deriva_schema::prelude::*;
use regex::Regex;
use std::sync::LazyLock;

static BY: LazyLock<Regex> = LazyLock::new(|| Regex::new("By[A-Z]").expect("static regex"));
static ORDER_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("OrderBy[A-Z]").expect("static regex"));
static JUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(And|Or)[A-Z]").expect("static regex"));

///
/// PrefixGroup
/// Interchangeable verbs opening a method name.
///

#[derive(Clone, Copy, Debug)]
pub(crate) struct PrefixGroup(&'static [&'static str]);

pub(crate) const FIND: PrefixGroup =
    PrefixGroup(&["find", "get", "query", "search", "read", "retrieve"]);
pub(crate) const LIST: PrefixGroup = PrefixGroup(&[
    "list", "find", "get", "query", "search", "read", "retrieve",
]);
pub(crate) const EXISTS: PrefixGroup = PrefixGroup(&["exists"]);
pub(crate) const COUNT: PrefixGroup = PrefixGroup(&["count"]);
pub(crate) const DELETE: PrefixGroup = PrefixGroup(&["delete", "remove", "erase", "eliminate"]);
pub(crate) const UPDATE: PrefixGroup = PrefixGroup(&["update"]);
pub(crate) const SAVE: PrefixGroup = PrefixGroup(&["save", "persist", "store", "insert"]);

impl PrefixGroup {
    /// Remainder of `name` after a prefix of this group ending on a word
    /// boundary.
    pub(crate) fn strip<'a>(&self, name: &'a str) -> Option<&'a str> {
        self.0.iter().find_map(|prefix| {
            let rest = name.strip_prefix(prefix)?;
            rest.chars()
                .next()
                .is_none_or(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
                .then_some(rest)
        })
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        self.strip(name).is_some()
    }
}

///
/// NameShape
/// Structural split of a method name, before any entity lookup.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NameShape<'a> {
    pub(crate) modifiers: &'a str,
    pub(crate) criteria: Option<&'a str>,
    pub(crate) order: Option<&'a str>,
}

impl<'a> NameShape<'a> {
    pub(crate) fn parse(group: PrefixGroup, name: &'a str) -> Option<Self> {
        let rest = group.strip(name)?;

        let (head, order) = match ORDER_BY.find(rest) {
            Some(m) => (&rest[..m.start()], Some(&rest[m.start() + "OrderBy".len()..])),
            None => (rest, None),
        };
        let (modifiers, criteria) = match BY.find(head) {
            Some(m) => (&head[..m.start()], Some(&head[m.start() + "By".len()..])),
            None => (head, None),
        };

        Some(Self {
            modifiers,
            criteria,
            order,
        })
    }
}

/// True for `<prefix>...By<criteria>` names.
pub(crate) fn has_criteria(group: PrefixGroup, name: &str) -> bool {
    NameShape::parse(group, name).is_some_and(|shape| shape.criteria.is_some())
}

///
/// Derived
/// Query derived from a method name plus the parameters it did not consume.
///

#[derive(Debug)]
pub(crate) struct Derived<'a> {
    pub(crate) query: QueryModel,
    pub(crate) remaining: Vec<&'a ParameterElement>,
}

impl Derived<'_> {
    /// Reject leftover parameters.
    pub(crate) fn into_query(self, ctx: &MatchContext<'_>) -> Result<QueryModel, ProcessError> {
        match self.remaining.first() {
            None => Ok(self.query),
            Some(p) => Err(ctx.invalid(format!(
                "parameter [{}] is not used by the query",
                p.name
            ))),
        }
    }
}

/// Derive the query model encoded in the method name.
pub(crate) fn derive<'a>(
    ctx: &MatchContext<'a>,
    group: PrefixGroup,
) -> Result<Derived<'a>, ProcessError> {
    let shape = NameShape::parse(group, &ctx.method.name)
        .ok_or_else(|| ctx.invalid("method name does not start with a supported prefix"))?;

    let (distinct, max) = parse_modifiers(ctx, shape.modifiers)?;
    let mut parameters = ctx.bindable_parameters();

    let predicate = match shape.criteria {
        Some(criteria) => criteria_predicate(ctx, criteria, &mut parameters)?,
        None => None,
    };

    let mut query = QueryModel::new(ctx.entity.name())
        .filter_opt(predicate)
        .distinct(distinct);
    if let Some(max) = max {
        query = query.max(max);
    }
    if let Some(order) = shape.order {
        query = query.order(parse_order(ctx, order)?);
    }

    Ok(Derived {
        query,
        remaining: parameters.collect(),
    })
}

/// Equality criteria keyed by parameter name; used where the name carries
/// no criteria of its own.
pub(crate) fn named_criteria(
    ctx: &MatchContext<'_>,
    parameters: &[&ParameterElement],
) -> Result<Option<Predicate>, ProcessError> {
    let predicates = parameters
        .iter()
        .map(|p| match ctx.entity.property(&p.name) {
            Some(property) => Ok(Predicate::equals(
                property.name.clone(),
                QueryParameter::new(p.name.clone()),
            )),
            None => Err(no_such_property(ctx, &p.name)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Predicate::all(predicates))
}

/// Entity property named by a capitalized name segment.
pub(crate) fn resolve_property(ctx: &MatchContext<'_>, segment: &str) -> Option<String> {
    [decapitalize(segment), segment.to_case(Case::Camel)]
        .into_iter()
        .find(|name| ctx.entity.property(name).is_some())
}

pub(crate) fn no_such_property(ctx: &MatchContext<'_>, name: &str) -> ProcessError {
    ctx.invalid(format!(
        "cannot query entity [{}] on non-existent property: {name}",
        ctx.entity.simple_name()
    ))
}

fn decapitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// Distinct | All | First<N> | Top<N>, in any order
fn parse_modifiers(
    ctx: &MatchContext<'_>,
    mut modifiers: &str,
) -> Result<(bool, Option<u32>), ProcessError> {
    let mut distinct = false;
    let mut max = None;

    while !modifiers.is_empty() {
        if let Some(rest) = modifiers.strip_prefix("Distinct") {
            distinct = true;
            modifiers = rest;
        } else if let Some(rest) = modifiers.strip_prefix("All") {
            modifiers = rest;
        } else if let Some(rest) = modifiers
            .strip_prefix("First")
            .or_else(|| modifiers.strip_prefix("Top"))
        {
            let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
            let limit = match &rest[..digits] {
                "" => 1,
                n => n
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| ctx.invalid(format!("invalid result limit [{n}]")))?,
            };
            max = Some(limit);
            modifiers = &rest[digits..];
        } else {
            return Err(ctx.invalid(format!("unsupported query modifier [{modifiers}]")));
        }
    }

    Ok((distinct, max))
}

///
/// Operator
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Operator {
    Compare(CompareOp),
    Between,
    IsNull,
    IsNotNull,
    IsEmpty,
    IsNotEmpty,
    IsTrue,
    IsFalse,
}

const OPERATORS: &[(&str, Operator)] = &[
    ("GreaterThanEquals", Operator::Compare(CompareOp::Gte)),
    ("GreaterThan", Operator::Compare(CompareOp::Gt)),
    ("LessThanEquals", Operator::Compare(CompareOp::Lte)),
    ("LessThan", Operator::Compare(CompareOp::Lt)),
    ("After", Operator::Compare(CompareOp::Gt)),
    ("Before", Operator::Compare(CompareOp::Lt)),
    ("NotEqual", Operator::Compare(CompareOp::Ne)),
    ("Equals", Operator::Compare(CompareOp::Eq)),
    ("Equal", Operator::Compare(CompareOp::Eq)),
    ("NotLike", Operator::Compare(CompareOp::NotLike)),
    ("Like", Operator::Compare(CompareOp::Like)),
    ("Ilike", Operator::Compare(CompareOp::Ilike)),
    ("Rlike", Operator::Compare(CompareOp::Rlike)),
    ("StartsWith", Operator::Compare(CompareOp::StartsWith)),
    ("StartingWith", Operator::Compare(CompareOp::StartsWith)),
    ("EndsWith", Operator::Compare(CompareOp::EndsWith)),
    ("EndingWith", Operator::Compare(CompareOp::EndsWith)),
    ("Contains", Operator::Compare(CompareOp::Contains)),
    ("Containing", Operator::Compare(CompareOp::Contains)),
    ("NotInList", Operator::Compare(CompareOp::NotIn)),
    ("NotIn", Operator::Compare(CompareOp::NotIn)),
    ("InList", Operator::Compare(CompareOp::In)),
    ("In", Operator::Compare(CompareOp::In)),
    ("Between", Operator::Between),
    ("InRange", Operator::Between),
    ("IsNotNull", Operator::IsNotNull),
    ("IsNull", Operator::IsNull),
    ("IsNotEmpty", Operator::IsNotEmpty),
    ("IsEmpty", Operator::IsEmpty),
    ("IsTrue", Operator::IsTrue),
    ("True", Operator::IsTrue),
    ("IsFalse", Operator::IsFalse),
    ("False", Operator::IsFalse),
];

// longest suffix first
static OPERATORS_BY_LENGTH: LazyLock<Vec<(&str, Operator)>> = LazyLock::new(|| {
    let mut operators = OPERATORS.to_vec();
    operators.sort_by_key(|(suffix, _)| std::cmp::Reverse(suffix.len()));
    operators
});

fn criteria_predicate<'a, I>(
    ctx: &MatchContext<'_>,
    criteria: &str,
    parameters: &mut I,
) -> Result<Option<Predicate>, ProcessError>
where
    I: Iterator<Item = &'a ParameterElement>,
{
    let (expressions, disjunction) = split_junctions(ctx, criteria)?;
    let predicates = expressions
        .into_iter()
        .map(|expr| criterion(ctx, expr, parameters))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(if disjunction {
        Predicate::any(predicates)
    } else {
        Predicate::all(predicates)
    })
}

// split on camel-case And / Or; the longest run of segments that names a
// property stays one expression. Returns whether the junction is Or.
fn split_junctions<'s>(
    ctx: &MatchContext<'_>,
    criteria: &'s str,
) -> Result<(Vec<&'s str>, bool), ProcessError> {
    let mut segments = Vec::new();
    let mut words = Vec::new();
    let mut start = 0;

    for m in JUNCTION.find_iter(criteria) {
        if m.start() == 0 {
            continue;
        }
        let word = &m.as_str()[..m.len() - 1];
        segments.push((start, m.start()));
        words.push(word);
        start = m.start() + word.len();
    }
    segments.push((start, criteria.len()));

    let mut expressions = Vec::new();
    let mut junction: Option<&str> = None;
    let mut first = 0;

    while first < segments.len() {
        let from = segments[first].0;
        let last = (first..segments.len())
            .rev()
            .find(|&last| resolve_expression(ctx, &criteria[from..segments[last].1]).is_some())
            .unwrap_or(first);
        expressions.push(&criteria[from..segments[last].1]);

        if let Some(&word) = words.get(last) {
            if junction.is_some_and(|j| j != word) {
                return Err(ctx.invalid("cannot mix And and Or criteria in one method name"));
            }
            junction = Some(word);
        }
        first = last + 1;
    }

    Ok((expressions, junction == Some("Or")))
}

// exact property first, then the longest operator suffix over a property stem
fn resolve_expression(ctx: &MatchContext<'_>, expr: &str) -> Option<(String, Operator)> {
    if let Some(property) = resolve_property(ctx, expr) {
        return Some((property, Operator::Compare(CompareOp::Eq)));
    }

    OPERATORS_BY_LENGTH.iter().find_map(|(suffix, operator)| {
        let stem = expr.strip_suffix(suffix).filter(|stem| !stem.is_empty())?;
        resolve_property(ctx, stem).map(|property| (property, *operator))
    })
}

fn criterion<'a, I>(
    ctx: &MatchContext<'_>,
    expr: &str,
    parameters: &mut I,
) -> Result<Predicate, ProcessError>
where
    I: Iterator<Item = &'a ParameterElement>,
{
    let (property, operator) =
        resolve_expression(ctx, expr).ok_or_else(|| no_such_property(ctx, &decapitalize(expr)))?;

    bind(ctx, expr, property, operator, parameters)
}

fn bind<'a, I>(
    ctx: &MatchContext<'_>,
    expr: &str,
    field: String,
    operator: Operator,
    parameters: &mut I,
) -> Result<Predicate, ProcessError>
where
    I: Iterator<Item = &'a ParameterElement>,
{
    let mut next = || {
        parameters
            .next()
            .map(|p| QueryParameter::new(p.name.clone()))
            .ok_or_else(|| ctx.invalid(format!("not enough parameters for criterion [{expr}]")))
    };

    Ok(match operator {
        Operator::Compare(op) => Predicate::compare(field, op, next()?),
        Operator::Between => {
            let from = next()?;
            let to = next()?;
            Predicate::Between { field, from, to }
        }
        Operator::IsNull => Predicate::IsNull { field },
        Operator::IsNotNull => Predicate::IsNotNull { field },
        Operator::IsEmpty => Predicate::IsEmpty { field },
        Operator::IsNotEmpty => Predicate::IsNotEmpty { field },
        Operator::IsTrue => Predicate::IsTrue { field },
        Operator::IsFalse => Predicate::IsFalse { field },
    })
}

// Name[Asc|Desc] segments joined by And
fn parse_order(ctx: &MatchContext<'_>, order: &str) -> Result<OrderSpec, ProcessError> {
    let mut fields = Vec::new();

    for segment in split_and(order) {
        let (stem, direction) = match resolve_property(ctx, segment) {
            Some(_) => (segment, OrderDirection::Asc),
            None => {
                if let Some(stem) = segment.strip_suffix("Desc") {
                    (stem, OrderDirection::Desc)
                } else {
                    (segment.strip_suffix("Asc").unwrap_or(segment), OrderDirection::Asc)
                }
            }
        };

        let property = resolve_property(ctx, stem)
            .ok_or_else(|| no_such_property(ctx, &decapitalize(stem)))?;
        fields.push((property, direction));
    }

    Ok(OrderSpec { fields })
}

fn split_and(order: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;

    for m in JUNCTION.find_iter(order) {
        if m.start() > 0 && m.as_str().starts_with("And") {
            segments.push(&order[start..m.start()]);
            start = m.start() + "And".len();
        }
    }
    segments.push(&order[start..]);

    segments
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_end_on_word_boundaries() {
        assert_eq!(FIND.strip("findByName"), Some("ByName"));
        assert_eq!(FIND.strip("find"), Some(""));
        assert_eq!(FIND.strip("finder"), None);
        assert_eq!(DELETE.strip("removeAll"), Some("All"));
        assert!(!COUNT.matches("counter"));
    }

    #[test]
    fn name_shape_splits_modifiers_criteria_and_order() {
        let shape = NameShape::parse(FIND, "findDistinctTop5ByNameAndAgeOrderByAgeDesc").unwrap();

        assert_eq!(shape.modifiers, "DistinctTop5");
        assert_eq!(shape.criteria, Some("NameAndAge"));
        assert_eq!(shape.order, Some("AgeDesc"));

        let shape = NameShape::parse(LIST, "findAllOrderByName").unwrap();
        assert_eq!(shape.modifiers, "All");
        assert_eq!(shape.criteria, None);
        assert_eq!(shape.order, Some("Name"));
    }

    #[test]
    fn by_requires_a_following_capital() {
        assert!(has_criteria(FIND, "findByName"));
        assert!(!has_criteria(FIND, "findBytes"));
        assert!(!has_criteria(FIND, "findAll"));
    }

    #[test]
    fn operators_are_sorted_longest_first() {
        let suffixes: Vec<_> = OPERATORS_BY_LENGTH.iter().map(|(s, _)| *s).collect();
        let not_in = suffixes.iter().position(|s| *s == "NotIn").unwrap();
        let is_in = suffixes.iter().position(|s| *s == "In").unwrap();
        let not_equal = suffixes.iter().position(|s| *s == "NotEqual").unwrap();
        let equal = suffixes.iter().position(|s| *s == "Equal").unwrap();

        assert!(not_in < is_in);
        assert!(not_equal < equal);
        assert_eq!(suffixes.first(), Some(&"GreaterThanEquals"));
    }

    #[test]
    fn split_and_ignores_words_inside_properties() {
        assert_eq!(split_and("NameAndAgeDesc"), vec!["Name", "AgeDesc"]);
        assert_eq!(split_and("Android"), vec!["Android"]);
        assert_eq!(decapitalize("FirstName"), "firstName");
    }
}
