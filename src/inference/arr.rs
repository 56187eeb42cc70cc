use super::U;

#[derive(Clone, Debug, Default)]
pub struct ArrC {
    pub item: Box<U>, // joined evidence of every element
}

impl ArrC {
    pub(super) fn join(a: &Self, b: &Self) -> Self {
        Self { item: Box::new(U::join(&a.item, &b.item)) }
    }
}
