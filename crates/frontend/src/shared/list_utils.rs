/// Утилиты для заголовков списков (индикатор и переключение сортировки)
use contracts::shared::list_request::SortDirection;

use super::list_state::SortChange;

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, direction: SortDirection) -> &'static str {
    if current_field == field {
        if direction.is_ascending() { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// CSS-класс индикатора: активная колонка подсвечивается
pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Сортировка после клика по заголовку `field`.
///
/// Повторный клик по активной колонке меняет направление, клик по новой
/// колонке сортирует её по возрастанию.
pub fn next_sort(current: &SortChange, field: &str) -> SortChange {
    if current.order_by == field {
        SortChange::new(field, current.direction.toggled())
    } else {
        SortChange::new(field, SortDirection::Asc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_sort_toggles_active_column() {
        let current = SortChange::new("number", SortDirection::Desc);
        assert_eq!(next_sort(&current, "number"), SortChange::new("number", SortDirection::Asc));
        assert_eq!(next_sort(&current, "title"), SortChange::new("title", SortDirection::Asc));
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("number", "number", SortDirection::Desc), " ▼");
        assert_eq!(get_sort_indicator("number", "number", SortDirection::Asc), " ▲");
        assert_eq!(get_sort_indicator("number", "title", SortDirection::Asc), " ⇅");
        assert!(get_sort_class("title", "title").ends_with("--active"));
    }
}
