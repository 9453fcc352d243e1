//! LTLf formulas over action symbols
//!
//! Formulas are interpreted over finite, non-empty traces where exactly one
//! action happens at each step. `X` is the strong next (a next step must
//! exist), `WX` the weak next (true at the last step).

use composition_services::Action;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ltlf {
    True,
    False,
    /// The action performed at the current step
    Atom(Action),
    Not(Box<Ltlf>),
    And(Box<Ltlf>, Box<Ltlf>),
    Or(Box<Ltlf>, Box<Ltlf>),
    Implies(Box<Ltlf>, Box<Ltlf>),
    Next(Box<Ltlf>),
    WeakNext(Box<Ltlf>),
    Until(Box<Ltlf>, Box<Ltlf>),
    Release(Box<Ltlf>, Box<Ltlf>),
    Eventually(Box<Ltlf>),
    Always(Box<Ltlf>),
}

impl Ltlf {
    pub fn atom(action: &Action) -> Self {
        Ltlf::Atom(action.clone())
    }

    pub fn negate(inner: Ltlf) -> Self {
        Ltlf::Not(Box::new(inner))
    }

    pub fn and(left: Ltlf, right: Ltlf) -> Self {
        Ltlf::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Ltlf, right: Ltlf) -> Self {
        Ltlf::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(left: Ltlf, right: Ltlf) -> Self {
        Ltlf::Implies(Box::new(left), Box::new(right))
    }

    pub fn next(inner: Ltlf) -> Self {
        Ltlf::Next(Box::new(inner))
    }

    pub fn weak_next(inner: Ltlf) -> Self {
        Ltlf::WeakNext(Box::new(inner))
    }

    pub fn until(left: Ltlf, right: Ltlf) -> Self {
        Ltlf::Until(Box::new(left), Box::new(right))
    }

    pub fn release(left: Ltlf, right: Ltlf) -> Self {
        Ltlf::Release(Box::new(left), Box::new(right))
    }

    pub fn eventually(inner: Ltlf) -> Self {
        Ltlf::Eventually(Box::new(inner))
    }

    pub fn always(inner: Ltlf) -> Self {
        Ltlf::Always(Box::new(inner))
    }

    /// Conjunction of all formulas; `true` when empty
    pub fn all<I: IntoIterator<Item = Ltlf>>(formulas: I) -> Self {
        formulas
            .into_iter()
            .reduce(Ltlf::and)
            .unwrap_or(Ltlf::True)
    }

    /// Disjunction of all formulas; `false` when empty
    pub fn any<I: IntoIterator<Item = Ltlf>>(formulas: I) -> Self {
        formulas
            .into_iter()
            .reduce(Ltlf::or)
            .unwrap_or(Ltlf::False)
    }

    /// Every action mentioned in the formula
    pub fn atoms(&self) -> BTreeSet<&Action> {
        let mut atoms = BTreeSet::new();
        self.collect_atoms(&mut atoms);
        atoms
    }

    fn collect_atoms<'a>(&'a self, atoms: &mut BTreeSet<&'a Action>) {
        match self {
            Ltlf::True | Ltlf::False => {}
            Ltlf::Atom(action) => {
                atoms.insert(action);
            }
            Ltlf::Not(inner)
            | Ltlf::Next(inner)
            | Ltlf::WeakNext(inner)
            | Ltlf::Eventually(inner)
            | Ltlf::Always(inner) => inner.collect_atoms(atoms),
            Ltlf::And(l, r)
            | Ltlf::Or(l, r)
            | Ltlf::Implies(l, r)
            | Ltlf::Until(l, r)
            | Ltlf::Release(l, r) => {
                l.collect_atoms(atoms);
                r.collect_atoms(atoms);
            }
        }
    }
}

impl fmt::Display for Ltlf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ltlf::True => write!(f, "true"),
            Ltlf::False => write!(f, "false"),
            Ltlf::Atom(action) => write!(f, "{}", action),
            Ltlf::Not(inner) => match inner.as_ref() {
                Ltlf::Atom(action) => write!(f, "!{}", action),
                other => write!(f, "!({})", other),
            },
            Ltlf::And(l, r) => write!(f, "({} & {})", l, r),
            Ltlf::Or(l, r) => write!(f, "({} | {})", l, r),
            Ltlf::Implies(l, r) => write!(f, "({} -> {})", l, r),
            Ltlf::Next(inner) => write!(f, "X({})", inner),
            Ltlf::WeakNext(inner) => write!(f, "WX({})", inner),
            Ltlf::Until(l, r) => write!(f, "({} U {})", l, r),
            Ltlf::Release(l, r) => write!(f, "({} R {})", l, r),
            Ltlf::Eventually(inner) => write!(f, "F({})", inner),
            Ltlf::Always(inner) => write!(f, "G({})", inner),
        }
    }
}
