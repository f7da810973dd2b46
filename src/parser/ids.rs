use crate::record::TestCase;

/// Fill empty IDs with `TC01`, `TC02`, ... in document order.
///
/// The counter only advances for records that receive an ID; explicit IDs are
/// left untouched even when they collide with a generated one.
pub fn assign_missing_ids(cases: &mut [TestCase]) {
    let mut counter = 1;
    for case in cases.iter_mut().filter(|c| c.id.is_empty()) {
        case.id = format!("TC{:02}", counter);
        counter += 1;
    }
}
