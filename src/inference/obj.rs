use std::collections::BTreeMap;
use super::U;

#[derive(Clone, Debug, Default)]
pub struct ObjC {
    pub fields: BTreeMap<String, FieldC>,
    pub seen_objects: u64,
}

#[derive(Clone, Debug, Default)]
pub struct FieldC {
    pub ty: U,
    pub non_null_in: u64, // declared only when present & non-null everywhere
}

impl ObjC {
    pub(super) fn join(a: &Self, b: &Self) -> Self {
        let mut out = Self {
            fields: a.fields.clone(),
            seen_objects: a.seen_objects + b.seen_objects,
        };
        for (k, fb) in &b.fields {
            match out.fields.get_mut(k) {
                Some(fa) => {
                    fa.ty = U::join(&fa.ty, &fb.ty);
                    fa.non_null_in += fb.non_null_in;
                }
                None => {
                    out.fields.insert(k.clone(), fb.clone());
                }
            }
        }
        out
    }
}
