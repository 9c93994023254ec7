//! Единый расчёт пагинации для всех списков.
//!
//! Раньше арифметика окна страниц дублировалась в общем контроле и в
//! подвале таблицы и успела разойтись. Обе поверхности теперь рендерят
//! результат `page_window`.

/// Элемент окна пагинации: номер страницы или многоточие.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

/// Окно видимых страниц по умолчанию.
pub const DEFAULT_MAX_VISIBLE: usize = 5;

/// Окно страниц для рендера: номера плюс многоточия.
///
/// Страницы нумеруются с 1. `current_page` вне `[1, total_pages]` —
/// нарушение контракта вызывающей стороной: функция не клампит,
/// клампить должен вызывающий до вызова.
pub fn page_window(current_page: usize, total_pages: usize, max_visible: usize) -> Vec<PageItem> {
    if total_pages <= max_visible {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let mut window = Vec::with_capacity(max_visible + 2);
    window.push(PageItem::Page(1));

    if current_page > 3 {
        window.push(PageItem::Ellipsis);
    }

    let from = current_page.saturating_sub(1).max(2);
    let to = (current_page + 1).min(total_pages - 1);
    for page in from..=to {
        window.push(PageItem::Page(page));
    }

    if current_page + 2 < total_pages {
        window.push(PageItem::Ellipsis);
    }

    window.push(PageItem::Page(total_pages));
    window
}

/// Состояние пагинации списка (страницы с 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            total_items: 0,
            page_size: page_size.max(1),
        }
    }

    /// Производный инвариант: total_pages = max(1, ceil(total / size)).
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    pub fn can_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn can_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Переход на страницу. Цель вне диапазона отклоняется как no-op,
    /// молчаливого клампа нет.
    pub fn jump_to_page(&mut self, target: usize) -> bool {
        if target < 1 || target > self.total_pages() {
            return false;
        }
        self.current_page = target;
        true
    }

    /// Кламп текущей страницы после изменения данных (смена фильтра,
    /// перезагрузка). Единственное место, где кламп допустим.
    pub fn clamp_current_page(&mut self) {
        let total = self.total_pages();
        if self.current_page > total {
            self.current_page = total;
        }
        if self.current_page < 1 {
            self.current_page = 1;
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.clamp_current_page();
    }

    /// Срез элементов текущей страницы.
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(window: &[PageItem]) -> Vec<Option<usize>> {
        window
            .iter()
            .map(|item| match item {
                PageItem::Page(p) => Some(*p),
                PageItem::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_window_fits_without_ellipsis() {
        let w = page_window(1, 3, 5);
        assert_eq!(pages(&w), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_window_middle() {
        let w = page_window(10, 20, 5);
        assert_eq!(
            pages(&w),
            vec![Some(1), None, Some(9), Some(10), Some(11), None, Some(20)]
        );
    }

    #[test]
    fn test_window_near_start() {
        assert_eq!(pages(&page_window(1, 20, 5)), vec![Some(1), Some(2), None, Some(20)]);
        assert_eq!(
            pages(&page_window(3, 20, 5)),
            vec![Some(1), Some(2), Some(3), Some(4), None, Some(20)]
        );
    }

    #[test]
    fn test_window_near_end() {
        assert_eq!(
            pages(&page_window(18, 20, 5)),
            vec![Some(1), None, Some(17), Some(18), Some(19), Some(20)]
        );
        assert_eq!(
            pages(&page_window(20, 20, 5)),
            vec![Some(1), None, Some(19), Some(20)]
        );
    }

    #[test]
    fn test_window_no_duplicates_and_monotonic() {
        for total in 1..=30usize {
            for current in 1..=total {
                let nums: Vec<usize> = page_window(current, total, 5)
                    .into_iter()
                    .filter_map(|i| match i {
                        PageItem::Page(p) => Some(p),
                        PageItem::Ellipsis => None,
                    })
                    .collect();
                let mut sorted = nums.clone();
                sorted.sort_unstable();
                sorted.dedup();
                assert_eq!(nums, sorted, "current={} total={}", current, total);
                assert!(nums.contains(&current));
            }
        }
    }

    #[test]
    fn test_single_page() {
        let state = PaginationState {
            current_page: 1,
            total_items: 0,
            page_size: 50,
        };
        assert_eq!(state.total_pages(), 1);
        assert!(!state.can_prev());
        assert!(!state.can_next());
        assert_eq!(pages(&page_window(1, 1, 5)), vec![Some(1)]);
    }

    #[test]
    fn test_prev_next_flags() {
        let mut state = PaginationState::new(10);
        state.total_items = 30;
        assert!(!state.can_prev());
        assert!(state.can_next());
        assert!(state.jump_to_page(3));
        assert!(state.can_prev());
        assert!(!state.can_next());
    }

    #[test]
    fn test_jump_rejects_out_of_range() {
        let mut state = PaginationState::new(10);
        state.total_items = 35; // 4 страницы
        state.current_page = 2;

        assert!(!state.jump_to_page(0));
        assert_eq!(state.current_page, 2);
        assert!(!state.jump_to_page(5));
        assert_eq!(state.current_page, 2);
        assert!(state.jump_to_page(4));
        assert_eq!(state.current_page, 4);
    }

    #[test]
    fn test_clamp_after_data_change() {
        let mut state = PaginationState::new(10);
        state.total_items = 100;
        state.current_page = 10;
        state.total_items = 15; // фильтр сузил список
        state.clamp_current_page();
        assert_eq!(state.current_page, 2);
    }

    #[test]
    fn test_page_slice() {
        let items: Vec<usize> = (0..25).collect();
        let mut state = PaginationState::new(10);
        state.total_items = items.len();
        assert_eq!(state.page_slice(&items), &items[0..10]);
        state.jump_to_page(3);
        assert_eq!(state.page_slice(&items), &items[20..25]);
    }
}
