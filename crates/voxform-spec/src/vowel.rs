//! Named positions on the vowel and voice-type axes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five table vowels, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vowel {
    /// /a/ as in "father".
    A,
    /// /e/ as in "bed".
    E,
    /// /i/ as in "feet".
    I,
    /// /o/ as in "boat".
    O,
    /// /u/ as in "boot".
    U,
}

impl Vowel {
    /// All vowels in table order.
    pub const ALL: [Vowel; 5] = [Vowel::A, Vowel::E, Vowel::I, Vowel::O, Vowel::U];

    /// Table row index (0-4).
    pub fn index(self) -> usize {
        match self {
            Vowel::A => 0,
            Vowel::E => 1,
            Vowel::I => 2,
            Vowel::O => 3,
            Vowel::U => 4,
        }
    }

    /// Position on the continuous vowel axis.
    pub fn position(self) -> f32 {
        self.index() as f32
    }
}

impl fmt::Display for Vowel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Vowel::A => "a",
            Vowel::E => "e",
            Vowel::I => "i",
            Vowel::O => "o",
            Vowel::U => "u",
        };
        f.write_str(name)
    }
}

impl FromStr for Vowel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" => Ok(Vowel::A),
            "e" => Ok(Vowel::E),
            "i" => Ok(Vowel::I),
            "o" => Ok(Vowel::O),
            "u" => Ok(Vowel::U),
            other => Err(format!("unknown vowel '{}', expected one of a, e, i, o, u", other)),
        }
    }
}

/// Voice types covered by the formant tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceType {
    /// Adult male.
    Male,
    /// Adult female.
    Female,
    /// Child.
    Child,
}

impl VoiceType {
    /// All voice types in morph order.
    pub const ALL: [VoiceType; 3] = [VoiceType::Male, VoiceType::Female, VoiceType::Child];

    /// Position on the voice-type morph axis where this table is pure.
    pub fn morph(self) -> f32 {
        match self {
            VoiceType::Male => 0.0,
            VoiceType::Female => 0.5,
            VoiceType::Child => 1.0,
        }
    }
}

impl fmt::Display for VoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VoiceType::Male => "male",
            VoiceType::Female => "female",
            VoiceType::Child => "child",
        };
        f.write_str(name)
    }
}

impl FromStr for VoiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" => Ok(VoiceType::Male),
            "female" => Ok(VoiceType::Female),
            "child" => Ok(VoiceType::Child),
            other => Err(format!(
                "unknown voice type '{}', expected one of male, female, child",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowel_positions() {
        let positions: Vec<f32> = Vowel::ALL.iter().map(|v| v.position()).collect();
        assert_eq!(positions, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_parse_round_trip() {
        for vowel in Vowel::ALL {
            assert_eq!(vowel.to_string().parse::<Vowel>().unwrap(), vowel);
        }
        for voice in VoiceType::ALL {
            assert_eq!(voice.to_string().parse::<VoiceType>().unwrap(), voice);
        }
        assert!("y".parse::<Vowel>().is_err());
        assert_eq!("CHILD".parse::<VoiceType>().unwrap(), VoiceType::Child);
    }

    #[test]
    fn test_voice_morph_points() {
        assert_eq!(VoiceType::Male.morph(), 0.0);
        assert_eq!(VoiceType::Female.morph(), 0.5);
        assert_eq!(VoiceType::Child.morph(), 1.0);
    }
}
