//! Usage classification: deciding whether a token is *used* in a piece of code.
//!
//! Both the relevance filter and the snippet resolver ask the same questions
//! ("is this token called?", "is it only declared?", "which variable holds an
//! instance of this type?"), so the patterns live here, in one place.

use regex::Regex;

/// Slot-registration macro that wraps a receiver, e.g. `AUI_SLOT(button)::setText`.
pub const SLOT_MACRO: &str = "AUI_SLOT";

/// Keywords that look like a type in `<word> <token>` but never declare anything.
const NON_TYPE_KEYWORDS: &[&str] = &[
    "return", "case", "throw", "else", "delete", "goto", "co_return", "co_yield", "co_await",
    "new", "typename", "template", "namespace", "class", "struct", "enum", "union", "using",
    "typedef", "friend", "public", "private", "protected", "operator", "sizeof", "not", "and",
    "or",
];

/// The syntactic shapes a token can appear in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageKind {
    /// `token(`
    Call,
    /// `token::`
    ScopeQualify,
    /// `token->`
    PointerAccess,
    /// `token.`
    MemberAccess,
    /// `AUI_SLOT(token)`
    SlotMacro,
    /// `token{`
    BraceInit,
    /// `_new<token>` or `_<token>`
    Construct,
    /// `Type token` / `auto token`: the token is the name being declared
    Declaration,
}

impl UsageKind {
    /// Kinds accepted as a reference to a member (scope-qualified) symbol.
    pub const MEMBER: &'static [Self] = &[
        Self::Call,
        Self::ScopeQualify,
        Self::PointerAccess,
        Self::MemberAccess,
        Self::SlotMacro,
        Self::BraceInit,
    ];

    /// Kinds accepted as a reference to a free symbol or type.
    pub const FREE: &'static [Self] = &[
        Self::Construct,
        Self::ScopeQualify,
        Self::PointerAccess,
        Self::MemberAccess,
        Self::Call,
        Self::SlotMacro,
    ];

    /// Kinds that make a receiver variable count as used.
    pub const ACCESS: &'static [Self] = &[Self::PointerAccess, Self::MemberAccess, Self::SlotMacro];

    /// Kinds that count as a use on a single highlighted line.
    pub const LINE: &'static [Self] = &[
        Self::Call,
        Self::ScopeQualify,
        Self::PointerAccess,
        Self::MemberAccess,
        Self::SlotMacro,
    ];
}

/// Compiled usage patterns for one token.
#[derive(Debug, Clone)]
pub struct UsageMatcher {
    token: String,
    word: Regex,
    call: Regex,
    scope: Regex,
    pointer: Regex,
    member: Regex,
    slot: Regex,
    brace: Regex,
    construct: Regex,
    declared_name: Regex,
    declared_of_type: Regex,
}

/// Builds a regex from a template where `{t}` is the escaped token.
///
/// Token text is always escaped, so the templates here are known to be valid.
fn compile(template: &str, token: &str) -> Regex {
    let source = template.replace("{t}", &regex::escape(token));
    Regex::new(&source).unwrap_or_else(|e| unreachable!("usage pattern {source:?} invalid: {e}"))
}

impl UsageMatcher {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            word: compile(r"\b{t}\b", token),
            call: compile(r"\b{t}\s*\(", token),
            scope: compile(r"\b{t}::", token),
            pointer: compile(r"\b{t}\s*->", token),
            member: compile(r"\b{t}\s*\.", token),
            slot: compile(&format!(r"{SLOT_MACRO}\(\s*{{t}}\s*\)"), token),
            brace: compile(r"\b{t}\s*\{", token),
            construct: compile(r"_(?:new)?<\s*{t}\s*>", token),
            declared_name: compile(r"(?P<ty>\b[A-Za-z_][\w:<>]*)[ \t*&]*[ \t][ \t*&]*{t}\b", token),
            declared_of_type: compile(
                r"\b{t}(?:[ \t]*<[^;<>]*>)?[ \t*&]*[ \t*&](?P<var>[A-Za-z_]\w*)[ \t]*(?:=|;|\(|\{|,|\))",
                token,
            ),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// True if the token occurs as a whole word.
    pub fn mentioned_in(&self, text: &str) -> bool {
        self.word.is_match(text)
    }

    /// True if `text` shows the token in the given shape.
    pub fn has(&self, text: &str, kind: UsageKind) -> bool {
        match kind {
            UsageKind::Call => self.call.is_match(text),
            UsageKind::ScopeQualify => self.scope.is_match(text),
            UsageKind::PointerAccess => self.pointer.is_match(text),
            UsageKind::MemberAccess => self.member.is_match(text),
            UsageKind::SlotMacro => self.slot.is_match(text),
            UsageKind::BraceInit => self.brace.is_match(text),
            UsageKind::Construct => self.construct.is_match(text),
            UsageKind::Declaration => text.lines().any(|line| self.declares_name(line)),
        }
    }

    /// True if `text` shows the token in any of the given shapes.
    pub fn has_any(&self, text: &str, kinds: &[UsageKind]) -> bool {
        kinds.iter().any(|&kind| self.has(text, kind))
    }

    /// True if `line` declares a variable named after the token (`int token`, `auto token`).
    pub fn declares_name(&self, line: &str) -> bool {
        self.declared_name
            .captures_iter(line)
            .any(|caps| !NON_TYPE_KEYWORDS.contains(&&caps["ty"]))
    }

    /// Names of variables declared with the token as their type on `line` (`Token var;`).
    pub fn declared_variables(&self, line: &str) -> Vec<String> {
        self.declared_of_type
            .captures_iter(line)
            .map(|caps| caps["var"].to_string())
            .filter(|var| !NON_TYPE_KEYWORDS.contains(&var.as_str()))
            .collect()
    }

    /// True if the token is referenced beyond merely declaring variables.
    ///
    /// A line that only declares a variable of the token's type, or a variable
    /// named after the token, does not count. Such a declaration is still a use
    /// when the declared variable is later accessed through `->`, `.` or the slot
    /// macro.
    pub fn used_beyond_declaration(&self, text: &str) -> bool {
        let mut declared = Vec::new();
        for line in text.lines().filter(|line| self.mentioned_in(line)) {
            let vars = self.declared_variables(line);
            if !vars.is_empty() {
                declared.extend(vars);
                continue;
            }
            if self.declares_name(line) {
                continue;
            }
            return true;
        }

        declared
            .iter()
            .any(|var| UsageMatcher::new(var).has_any(text, UsageKind::ACCESS))
    }
}

/// Splits a scope-qualified name into its immediate owner and member.
///
/// `ns::Widget::show` yields `("Widget", "show")`. Unqualified names yield `None`.
pub fn split_scope(name: &str) -> Option<(&str, &str)> {
    let (scope, member) = name.rsplit_once("::")?;
    let owner = scope.rsplit("::").next().unwrap_or(scope);
    (!owner.is_empty() && !member.is_empty()).then_some((owner, member))
}

/// The unqualified part of a name: everything after the last `::`.
pub fn member_name(name: &str) -> &str {
    name.rsplit("::").next().unwrap_or(name)
}

/// Variables bound to an instance of `class_name` in `text`.
///
/// Recognizes `var = _new<Class>(...)`, `_<Class> var` and `Class var;` / `Class var = ...`.
pub fn bound_variables(text: &str, class_name: &str) -> Vec<String> {
    let constructed = compile(r"(?P<var>\b[A-Za-z_]\w*)\s*=\s*_new<\s*{t}\b", class_name);
    let wrapped = compile(r"_<\s*{t}\s*>\s*(?P<var>[A-Za-z_]\w*)", class_name);

    let mut vars: Vec<String> = constructed
        .captures_iter(text)
        .chain(wrapped.captures_iter(text))
        .map(|caps| caps["var"].to_string())
        .collect();

    let typed = UsageMatcher::new(class_name);
    vars.extend(text.lines().flat_map(|line| typed.declared_variables(line)));

    let mut seen = ahash::AHashSet::new();
    vars.retain(|var| seen.insert(var.clone()));
    vars
}

/// Receivers through which `member` is reached: `recv->member`, `recv.member`,
/// `AUI_SLOT(recv)::member`.
pub fn member_receivers(text: &str, member: &str) -> Vec<String> {
    let access = compile(r"(?P<recv>\b[A-Za-z_]\w*)\s*(?:->|\.)\s*{t}\b", member);
    let slot = compile(&format!(r"{SLOT_MACRO}\(\s*(?P<recv>\w+)\s*\)::{{t}}\b"), member);

    access
        .captures_iter(text)
        .chain(slot.captures_iter(text))
        .map(|caps| caps["recv"].to_string())
        .collect()
}

/// True if `member` is reached through a receiver bound to an instance of `class_name`.
///
/// Receivers are taken from `snippet`, bindings from the wider `local` window.
pub fn member_reached_through(snippet: &str, local: &str, class_name: &str, member: &str) -> bool {
    let receivers = member_receivers(snippet, member);
    if receivers.is_empty() {
        return false;
    }
    let bound = bound_variables(local, class_name);
    receivers.iter().any(|recv| bound.contains(recv))
}
