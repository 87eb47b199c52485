use super::model::Record;

/// Records whose category equals `category`, in input order.
///
/// No selection means nothing matches.
pub fn records_for_category<'a>(
    records: &'a [Record],
    category: Option<&str>,
) -> Vec<&'a Record> {
    let Some(category) = category else {
        return Vec::new();
    };
    records.iter().filter(|r| r.category == category).collect()
}
