//! Model-based checks of `DynArr` against `Vec`.

use dyn_array::DynArr;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Push(i64),
    Pop,
    Insert(usize, i64),
    Erase(usize),
    Resize(usize),
    Reserve(usize),
    Set(usize, i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i64>().prop_map(Op::Push),
        1 => Just(Op::Pop),
        2 => (any::<usize>(), any::<i64>()).prop_map(|(at, v)| Op::Insert(at, v)),
        2 => any::<usize>().prop_map(Op::Erase),
        1 => (0usize..64).prop_map(Op::Resize),
        1 => (0usize..128).prop_map(Op::Reserve),
        1 => (any::<usize>(), any::<i64>()).prop_map(|(at, v)| Op::Set(at, v)),
    ]
}

fn from_slice(values: &[i64]) -> DynArr<i64> {
    let mut arr = DynArr::new();
    for v in values {
        arr.push_back(*v).unwrap();
    }
    arr
}

proptest! {
    #[test]
    fn sized_construction(n in 0usize..256) {
        let arr = DynArr::<u32>::with_len(n).unwrap();
        prop_assert_eq!(arr.len(), n);
        prop_assert_eq!(arr.capacity(), n);
        prop_assert!(arr.iter().all(|v| *v == 0));
    }

    #[test]
    fn appends_keep_values(values in prop::collection::vec(any::<i64>(), 0..300)) {
        let mut arr = DynArr::new();
        let mut reallocations = 0u32;
        for (i, v) in values.iter().enumerate() {
            let cap = arr.capacity();
            arr.push_back(*v).unwrap();
            prop_assert_eq!(arr.len(), i + 1);
            prop_assert_eq!(arr.as_slice(), &values[..=i]);
            if arr.capacity() != cap {
                reallocations += 1;
            }
        }
        let bound = usize::BITS - values.len().leading_zeros() + 1;
        prop_assert!(reallocations <= bound);
    }

    #[test]
    fn reserve_never_shrinks(values in prop::collection::vec(any::<i64>(), 0..40), k in 0usize..80) {
        let mut arr = from_slice(&values);
        let cap = arr.capacity();
        let ptr = arr.as_ptr();
        arr.reserve(k).unwrap();
        prop_assert!(arr.capacity() >= k);
        if k <= cap {
            prop_assert_eq!(arr.capacity(), cap);
            prop_assert_eq!(arr.as_ptr(), ptr);
        }
        prop_assert_eq!(arr.as_slice(), &values[..]);
    }

    #[test]
    fn clone_is_independent(values in prop::collection::vec(any::<i64>(), 1..40), extra in any::<i64>()) {
        let a = from_slice(&values);
        let mut b = a.clone();
        b[0] = b[0].wrapping_add(1);
        b.push_back(extra).unwrap();
        b.erase(0);
        prop_assert_eq!(a.as_slice(), &values[..]);
    }

    #[test]
    fn take_leaves_source_empty(values in prop::collection::vec(any::<i64>(), 0..40)) {
        let mut a = from_slice(&values);
        let b = DynArr::take_from(&mut a);
        prop_assert_eq!(a.len(), 0);
        prop_assert_eq!(a.capacity(), 0);
        prop_assert_eq!(b.as_slice(), &values[..]);

        let mut c = DynArr::new();
        let mut b = b;
        c.move_assign(&mut b);
        prop_assert_eq!(b.len(), 0);
        prop_assert_eq!(b.capacity(), 0);
        prop_assert_eq!(c.as_slice(), &values[..]);
    }

    #[test]
    fn insert_then_erase_restores(values in prop::collection::vec(any::<i64>(), 0..40), at in any::<usize>(), v in any::<i64>()) {
        let mut arr = from_slice(&values);
        let at = at % (values.len() + 1);
        prop_assert_eq!(arr.insert(at, v).unwrap(), at);
        prop_assert_eq!(arr[at], v);
        prop_assert_eq!(arr.erase(at), at);
        prop_assert_eq!(arr.as_slice(), &values[..]);
    }

    #[test]
    fn resize_matches_vec(values in prop::collection::vec(any::<i64>(), 0..40), n in 0usize..80) {
        let mut arr = from_slice(&values);
        let mut model = values.clone();
        arr.resize(n).unwrap();
        model.resize(n, 0);
        prop_assert_eq!(arr.as_slice(), &model[..]);
    }

    #[test]
    fn clone_from_matches_source(dst in prop::collection::vec(any::<i64>(), 0..40), src in prop::collection::vec(any::<i64>(), 0..40)) {
        let mut a = from_slice(&dst);
        let b = from_slice(&src);
        a.clone_from(&b);
        prop_assert_eq!(a.as_slice(), &src[..]);
        prop_assert!(a.capacity() >= src.len());
    }

    #[test]
    fn ops_match_vec(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut arr = DynArr::new();
        let mut model: Vec<i64> = Vec::new();
        for op in ops {
            match op {
                Op::Push(v) => {
                    arr.push_back(v).unwrap();
                    model.push(v);
                }
                Op::Pop => {
                    prop_assert_eq!(arr.pop(), model.pop());
                }
                Op::Insert(at, v) => {
                    let at = at % (model.len() + 1);
                    arr.insert(at, v).unwrap();
                    model.insert(at, v);
                }
                Op::Erase(at) => {
                    if !model.is_empty() {
                        let at = at % model.len();
                        arr.erase(at);
                        model.remove(at);
                    }
                }
                Op::Resize(n) => {
                    arr.resize(n).unwrap();
                    model.resize(n, 0);
                }
                Op::Reserve(k) => {
                    arr.reserve(k).unwrap();
                }
                Op::Set(at, v) => {
                    if !model.is_empty() {
                        let at = at % model.len();
                        arr[at] = v;
                        model[at] = v;
                    }
                }
            }
            prop_assert!(arr.len() <= arr.capacity());
            prop_assert_eq!(arr.as_slice(), &model[..]);
        }
        let drained: Vec<i64> = arr.into_iter().collect();
        prop_assert_eq!(drained, model);
    }
}
