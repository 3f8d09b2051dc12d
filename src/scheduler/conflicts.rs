use crate::model::{Board, Shift, ShiftId, UserId};

/// Deux shifts assignés à la même personne qui se chevauchent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub staff: UserId,
    pub shift_a: ShiftId,
    pub shift_b: ShiftId,
}

/// Signale les chevauchements ; l'assignation ne les empêche pas.
pub fn find_overlaps(board: &Board) -> Vec<Overlap> {
    let mut out = Vec::new();

    for account in board.accounts.iter().filter(|a| a.is_staff()) {
        let mut shifts: Vec<&Shift> = board
            .shifts
            .iter()
            .filter(|s| s.staff_id.as_ref() == Some(&account.id))
            .collect();
        shifts.sort_by_key(|s| s.start);

        for (idx, a) in shifts.iter().enumerate() {
            // triés par début : dès qu'un shift commence après la fin de `a`, on arrête
            for b in shifts.iter().skip(idx + 1).take_while(|b| b.start < a.end) {
                if a.overlaps(b) {
                    out.push(Overlap {
                        staff: account.id.clone(),
                        shift_a: a.id.clone(),
                        shift_b: b.id.clone(),
                    });
                }
            }
        }
    }

    out
}
