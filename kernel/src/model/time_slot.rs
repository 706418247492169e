use crate::model::id::{ThemeId, TimeSlotId};
use chrono::NaiveTime;

/// テーマに属する、日付に依存しない毎日繰り返しの時間枠。
#[derive(Debug, Clone)]
pub struct TimeSlot {
    pub time_slot_id: TimeSlotId,
    pub theme_id: ThemeId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
}

#[derive(Debug)]
pub struct SlotAvailability {
    pub time_slot: TimeSlot,
    pub reserved: bool,
}

/// 時間枠の一覧に予約済みフラグを付与する。入力順を保つ。
pub fn mark_reserved(slots: Vec<TimeSlot>, reserved_ids: &[TimeSlotId]) -> Vec<SlotAvailability> {
    slots
        .into_iter()
        .map(|slot| {
            let reserved = reserved_ids.contains(&slot.time_slot_id);
            SlotAvailability {
                time_slot: slot,
                reserved,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(id: i64, start: &str) -> TimeSlot {
        TimeSlot {
            time_slot_id: TimeSlotId::new(id),
            theme_id: ThemeId::new(1),
            start_time: start.parse().unwrap(),
            end_time: "23:59:59".parse().unwrap(),
            is_active: true,
        }
    }

    #[test]
    fn marks_only_reserved_slots() {
        let slots = vec![slot(1, "10:00:00"), slot(2, "12:00:00"), slot(3, "14:00:00")];
        let reserved = [TimeSlotId::new(2)];

        let marked = mark_reserved(slots, &reserved);

        assert_eq!(marked.len(), 3);
        assert!(!marked[0].reserved);
        assert!(marked[1].reserved);
        assert!(!marked[2].reserved);
    }

    #[test]
    fn keeps_input_order() {
        let slots = vec![slot(3, "14:00:00"), slot(1, "10:00:00")];
        let marked = mark_reserved(slots, &[]);

        assert_eq!(marked[0].time_slot.time_slot_id, TimeSlotId::new(3));
        assert_eq!(marked[1].time_slot.time_slot_id, TimeSlotId::new(1));
    }

    #[test]
    fn empty_reserved_set_marks_nothing() {
        let marked = mark_reserved(vec![slot(1, "10:00:00")], &[]);
        assert!(marked.iter().all(|s| !s.reserved));
    }
}
