//! Сортировка списков по именованному полю.

use std::cmp::Ordering;

/// Trait для строк списка, поддерживающих сортировку по полю.
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Сортирует список по полю с учётом направления.
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Индикатор сортировки для заголовка колонки.
pub fn sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field != field {
        return "";
    }
    if ascending {
        " \u{2191}"
    } else {
        " \u{2193}"
    }
}
