use crate::models::{Player, Position};

const CLUB: &str = "Beşiktaş";

// id, name, position, rating, nationality
const SQUAD: [(&str, &str, Position, u8, &str); 18] = [
    ("1", "Mert Günok", Position::GK, 77, "Turkey"),
    ("2", "Jonas Svensson", Position::RB, 72, "Turkey"),
    ("3", "Gabriel Paulista", Position::CB, 88, "Portugal"),
    ("4", "Felix Uduokhai", Position::CB, 86, "Brazil"),
    ("5", "Arthur Masuaku", Position::LB, 84, "Brazil"),
    ("6", "Gedson Fernandes", Position::CM, 83, "Turkey"),
    ("7", "Alex Oxlade-Chamberlain", Position::CDM, 85, "Canada"),
    ("8", "Kenny Arroyo", Position::LW, 87, "Portugal"),
    ("9", "Milot Rashica", Position::RM, 77, "Kosova"),
    ("10", "Rafa Silva", Position::RW, 86, "Portugal"),
    ("11", "Ciro Immobile", Position::ST, 89, "Uruguay"),
    // substitutes
    ("12", "Ersin Destanoğlu", Position::GK, 79, "Turkey"),
    ("13", "Necip Uysal", Position::CM, 80, "Turkey"),
    ("14", "Cenk Tosun", Position::ST, 82, "Turkey"),
    ("15", "Salih Uçan", Position::CDM, 75, "Turkey"),
    ("16", "Tayyip Talha Sanuç", Position::CB, 73, "Turkey"),
    ("17", "Onur Bulut", Position::RB, 71, "Turkey"),
    ("18", "Mustafa Hekimoğlu", Position::LW, 69, "Turkey"),
];

/// Index in the default squad where the substitutes start.
pub const FIRST_SUBSTITUTE: usize = 11;

/// Built-in squad. Portraits are left empty; hosts show initials instead.
pub fn default_squad() -> Vec<Player> {
    SQUAD
        .iter()
        .map(|(id, name, position, rating, nationality)| Player {
            nationality: nationality.to_string(),
            club: CLUB.to_string(),
            ..Player::new(id, name, *position, *rating)
        })
        .collect()
}

/// The substitutes of the default squad.
pub fn default_bench() -> Vec<Player> {
    default_squad().split_off(FIRST_SUBSTITUTE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bench_is_the_seven_substitutes() {
        let bench = default_bench();
        assert_eq!(bench.len(), 7);
        assert_eq!(bench[0].id, "12");
        assert!(bench.iter().all(|p| p.club == CLUB));
    }
}
