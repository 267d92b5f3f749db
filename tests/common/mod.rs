//! A tiny arithmetic-with-branches language used only to exercise the
//! engine end to end. Not part of the public API.

use std::rc::Rc;

use kirin::{Action, AbstractValue, Env, Semantics, SmallVec, Store, Time};

pub type Addr = String;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expr {
    Const(i64),
    Var(String),
    Add(Rc<Expr>, Rc<Expr>),
    Lt(Rc<Expr>, Rc<Expr>),
    If(Rc<Expr>, Rc<Expr>, Rc<Expr>),
    Let(String, Rc<Expr>, Rc<Expr>),
    Lam(String, Rc<Expr>),
    App(Rc<Expr>, Rc<Expr>),
    Letrec(String, String, Rc<Expr>, Rc<Expr>),
    /// Always errors once its argument is evaluated — enough to exercise
    /// the `Error` terminal without modelling pairs/lists at all.
    Car(Rc<Expr>),
}

impl Expr {
    pub fn add(l: Expr, r: Expr) -> Expr {
        Expr::Add(Rc::new(l), Rc::new(r))
    }
    pub fn lt(l: Expr, r: Expr) -> Expr {
        Expr::Lt(Rc::new(l), Rc::new(r))
    }
    pub fn if_(c: Expr, t: Expr, e: Expr) -> Expr {
        Expr::If(Rc::new(c), Rc::new(t), Rc::new(e))
    }
    pub fn let_(name: impl Into<String>, bound: Expr, body: Expr) -> Expr {
        Expr::Let(name.into(), Rc::new(bound), Rc::new(body))
    }
    pub fn lam(param: impl Into<String>, body: Expr) -> Expr {
        Expr::Lam(param.into(), Rc::new(body))
    }
    pub fn app(f: Expr, a: Expr) -> Expr {
        Expr::App(Rc::new(f), Rc::new(a))
    }
    pub fn letrec(
        name: impl Into<String>,
        param: impl Into<String>,
        body: Expr,
        in_expr: Expr,
    ) -> Expr {
        Expr::Letrec(name.into(), param.into(), Rc::new(body), Rc::new(in_expr))
    }
    pub fn car(e: Expr) -> Expr {
        Expr::Car(Rc::new(e))
    }
}

/// Integers collapse to `Any` the first time two distinct values are
/// joined (a k=1 bound), so the domain stays finite under recursion.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntAbs {
    Exact(i64),
    Any,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Bottom,
    Int(IntAbs),
    Closure(String, Rc<Expr>, Env<Addr>),
    /// Join of shapes that don't otherwise unify (e.g. an int and a closure).
    Top,
}

impl Value {
    pub fn int(n: i64) -> Value {
        Value::Int(IntAbs::Exact(n))
    }

    fn is_possibly_negative(&self) -> bool {
        match self {
            Value::Int(IntAbs::Exact(n)) => *n < 0,
            Value::Int(IntAbs::Any) => true,
            _ => true,
        }
    }

    fn is_possibly_non_negative(&self) -> bool {
        match self {
            Value::Int(IntAbs::Exact(n)) => *n >= 0,
            Value::Int(IntAbs::Any) => true,
            _ => true,
        }
    }
}

impl AbstractValue for Value {
    fn bottom() -> Self {
        Value::Bottom
    }

    fn join(&self, other: &Self) -> Self {
        match (self, other) {
            (Value::Bottom, x) | (x, Value::Bottom) => x.clone(),
            (Value::Int(a), Value::Int(b)) => {
                if a == b {
                    Value::Int(a.clone())
                } else {
                    Value::Int(IntAbs::Any)
                }
            }
            (Value::Closure(p1, b1, e1), Value::Closure(p2, b2, e2)) => {
                if p1 == p2 && b1 == b2 && e1 == e2 {
                    self.clone()
                } else {
                    Value::Top
                }
            }
            (a, b) if a == b => a.clone(),
            _ => Value::Top,
        }
    }

    fn subsumes(&self, other: &Self) -> bool {
        match (self, other) {
            (_, Value::Bottom) => true,
            (Value::Top, _) => true,
            (Value::Int(IntAbs::Any), Value::Int(_)) => true,
            (a, b) => a == b,
        }
    }
}

/// Continuation frames for the toy language.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Frame {
    AddR(Rc<Expr>, Env<Addr>),
    AddL(Value),
    LtR(Rc<Expr>, Env<Addr>),
    LtL(Value),
    If(Rc<Expr>, Rc<Expr>, Env<Addr>),
    Let(String, Rc<Expr>, Env<Addr>),
    AppArg(Rc<Expr>, Env<Addr>),
    AppFun(Value),
    Car,
}

/// Errors the toy semantics can surface via `Action::Error`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ToyError {
    UnboundVariable(String),
    NotAnInteger,
    NotAFunction,
    CarOfNonPair,
}

/// A clock that wraps modulo a small bound so `KontAddr::Normal`'s address
/// space stays finite no matter how deep the recursion runs.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Clock(pub u8);

const CLOCK_BOUND: u8 = 4;

impl Time<Expr> for Clock {
    fn initial(_seed: &str) -> Self {
        Clock(0)
    }

    fn tick(&self) -> Self {
        Clock((self.0 + 1) % CLOCK_BOUND)
    }

    fn tick_call(&self, _call_site: &Expr) -> Self {
        Clock((self.0 + 1) % CLOCK_BOUND)
    }
}

type ToyAction = Action<Expr, Addr, Value, Frame, ToyError>;
type ToyActions = SmallVec<[ToyAction; 4]>;

pub struct ToySemantics;

fn addr_of(name: &str) -> Addr {
    name.to_string()
}

impl Semantics<Expr, Addr, Value, Clock, Frame, ToyError> for ToySemantics {
    fn initial_env(&self) -> Env<Addr> {
        Env::new()
    }

    fn initial_store(&self) -> Store<Addr, Value> {
        Store::new()
    }

    fn step_eval(
        &self,
        expr: &Expr,
        env: &Env<Addr>,
        store: &Store<Addr, Value>,
        _time: &Clock,
    ) -> ToyActions {
        let mut out = ToyActions::new();
        match expr {
            Expr::Const(n) => out.push(Action::ReachedValue(Value::int(*n), store.clone())),
            Expr::Var(name) => match env.lookup(name) {
                Some(a) => out.push(Action::ReachedValue(store.lookup(a), store.clone())),
                None => out.push(Action::Error(ToyError::UnboundVariable(name.clone()))),
            },
            Expr::Add(l, r) => out.push(Action::Push(
                Frame::AddR(r.clone(), env.clone()),
                (**l).clone(),
                env.clone(),
                store.clone(),
            )),
            Expr::Lt(l, r) => out.push(Action::Push(
                Frame::LtR(r.clone(), env.clone()),
                (**l).clone(),
                env.clone(),
                store.clone(),
            )),
            Expr::If(c, t, e) => out.push(Action::Push(
                Frame::If(t.clone(), e.clone(), env.clone()),
                (**c).clone(),
                env.clone(),
                store.clone(),
            )),
            Expr::Let(name, bound, body) => out.push(Action::Push(
                Frame::Let(name.clone(), body.clone(), env.clone()),
                (**bound).clone(),
                env.clone(),
                store.clone(),
            )),
            Expr::Lam(param, body) => out.push(Action::ReachedValue(
                Value::Closure(param.clone(), body.clone(), env.clone()),
                store.clone(),
            )),
            Expr::App(f, a) => out.push(Action::Push(
                Frame::AppArg(a.clone(), env.clone()),
                (**f).clone(),
                env.clone(),
                store.clone(),
            )),
            Expr::Letrec(name, param, body, in_expr) => {
                let a_f = addr_of(name);
                let env2 = env.extend(name.clone(), a_f.clone());
                let closure = Value::Closure(param.clone(), body.clone(), env2.clone());
                let store2 = store.extend(a_f, closure);
                out.push(Action::Eval((**in_expr).clone(), env2, store2));
            }
            Expr::Car(e) => out.push(Action::Push(
                Frame::Car,
                (**e).clone(),
                env.clone(),
                store.clone(),
            )),
        }
        out
    }

    fn step_kont(
        &self,
        value: &Value,
        frame: &Frame,
        store: &Store<Addr, Value>,
        _time: &Clock,
    ) -> ToyActions {
        let mut out = ToyActions::new();
        match frame {
            Frame::AddR(r, env) => out.push(Action::Push(
                Frame::AddL(value.clone()),
                (**r).clone(),
                env.clone(),
                store.clone(),
            )),
            Frame::AddL(lhs) => match (lhs, value) {
                (Value::Int(IntAbs::Exact(a)), Value::Int(IntAbs::Exact(b))) => {
                    out.push(Action::ReachedValue(Value::int(a + b), store.clone()))
                }
                (Value::Int(_), Value::Int(_)) => {
                    out.push(Action::ReachedValue(Value::Int(IntAbs::Any), store.clone()))
                }
                _ => out.push(Action::Error(ToyError::NotAnInteger)),
            },
            Frame::LtR(r, env) => out.push(Action::Push(
                Frame::LtL(value.clone()),
                (**r).clone(),
                env.clone(),
                store.clone(),
            )),
            Frame::LtL(lhs) => match (lhs, value) {
                (Value::Int(IntAbs::Exact(a)), Value::Int(IntAbs::Exact(b))) => {
                    out.push(Action::ReachedValue(Value::int(if a < b { 1 } else { 0 }), store.clone()))
                }
                (Value::Int(_), Value::Int(_)) => {
                    out.push(Action::ReachedValue(Value::Int(IntAbs::Any), store.clone()))
                }
                _ => out.push(Action::Error(ToyError::NotAnInteger)),
            },
            Frame::If(t, e, env) => {
                if value.is_possibly_non_negative() {
                    out.push(Action::Eval((**e).clone(), env.clone(), store.clone()));
                }
                if value.is_possibly_negative() {
                    out.push(Action::Eval((**t).clone(), env.clone(), store.clone()));
                }
            }
            Frame::Let(name, body, env) => {
                let a = addr_of(name);
                let store2 = store.extend(a.clone(), value.clone());
                let env2 = env.extend(name.clone(), a);
                out.push(Action::Eval((**body).clone(), env2, store2));
            }
            Frame::AppArg(arg, env) => out.push(Action::Push(
                Frame::AppFun(value.clone()),
                (**arg).clone(),
                env.clone(),
                store.clone(),
            )),
            Frame::AppFun(fun) => match fun {
                Value::Closure(param, body, captured_env) => {
                    let a = addr_of(param);
                    let store2 = store.extend(a.clone(), value.clone());
                    let env2 = captured_env.extend(param.clone(), a);
                    out.push(Action::Eval((**body).clone(), env2, store2));
                }
                _ => out.push(Action::Error(ToyError::NotAFunction)),
            },
            Frame::Car => out.push(Action::Error(ToyError::CarOfNonPair)),
        }
        out
    }
}
