//! Numbers as spoken British English
//!
//! Any `u32` can be read out with 33 recorded words. [`number_to_words`]
//! produces the word sequence, and each [`NumberWord`] names the clip that
//! holds its recording.

use std::fmt;

/// One word of the spoken-number vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumberWord {
    Zero,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
    Seventeen,
    Eighteen,
    Nineteen,
    Twenty,
    Thirty,
    Forty,
    Fifty,
    Sixty,
    Seventy,
    Eighty,
    Ninety,
    Hundred,
    Thousand,
    Million,
    Billion,
    And,
}

impl NumberWord {
    /// Every word, in vocabulary order
    pub const ALL: [Self; 33] = [
        Self::Zero,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Eleven,
        Self::Twelve,
        Self::Thirteen,
        Self::Fourteen,
        Self::Fifteen,
        Self::Sixteen,
        Self::Seventeen,
        Self::Eighteen,
        Self::Nineteen,
        Self::Twenty,
        Self::Thirty,
        Self::Forty,
        Self::Fifty,
        Self::Sixty,
        Self::Seventy,
        Self::Eighty,
        Self::Ninety,
        Self::Hundred,
        Self::Thousand,
        Self::Million,
        Self::Billion,
        Self::And,
    ];

    /// Word for 0..=19
    fn unit(n: u32) -> Self {
        // Zero..=Nineteen are the first twenty entries
        Self::ALL[n as usize % 20]
    }

    /// Word for 20, 30, .. 90
    fn tens(n: u32) -> Self {
        Self::ALL[18 + (n as usize / 10) % 10]
    }

    /// The word as spoken, which is also its clip stem
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Three => "three",
            Self::Four => "four",
            Self::Five => "five",
            Self::Six => "six",
            Self::Seven => "seven",
            Self::Eight => "eight",
            Self::Nine => "nine",
            Self::Ten => "ten",
            Self::Eleven => "eleven",
            Self::Twelve => "twelve",
            Self::Thirteen => "thirteen",
            Self::Fourteen => "fourteen",
            Self::Fifteen => "fifteen",
            Self::Sixteen => "sixteen",
            Self::Seventeen => "seventeen",
            Self::Eighteen => "eighteen",
            Self::Nineteen => "nineteen",
            Self::Twenty => "twenty",
            Self::Thirty => "thirty",
            Self::Forty => "forty",
            Self::Fifty => "fifty",
            Self::Sixty => "sixty",
            Self::Seventy => "seventy",
            Self::Eighty => "eighty",
            Self::Ninety => "ninety",
            Self::Hundred => "hundred",
            Self::Thousand => "thousand",
            Self::Million => "million",
            Self::Billion => "billion",
            Self::And => "and",
        }
    }

    /// Stem of the clip and header holding this word
    #[must_use]
    pub fn clip_stem(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for NumberWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spell out a number, e.g. `1234` as "one thousand two hundred and thirty four"
#[must_use]
pub fn number_to_words(number: u32) -> Vec<NumberWord> {
    if number == 0 {
        return vec![NumberWord::Zero];
    }

    let mut words = Vec::new();
    let mut remainder = number;

    for (scale, word) in [
        (1_000_000_000, NumberWord::Billion),
        (1_000_000, NumberWord::Million),
        (1_000, NumberWord::Thousand),
    ] {
        if remainder >= scale {
            push_hundreds(&mut words, remainder / scale, false);
            words.push(word);
            remainder %= scale;
        }
    }

    // "one thousand and five", but plain "five"
    let add_and = !words.is_empty();
    push_hundreds(&mut words, remainder, add_and);

    words
}

/// Spell out 0..=999, joining hundreds and the rest with "and"
fn push_hundreds(words: &mut Vec<NumberWord>, number: u32, mut add_and: bool) {
    let hundreds = number / 100;
    let rest = number % 100;

    if hundreds > 0 {
        words.push(NumberWord::unit(hundreds));
        words.push(NumberWord::Hundred);
        add_and = true;
    }

    if rest == 0 {
        return;
    }
    if add_and {
        words.push(NumberWord::And);
    }

    if rest >= 20 {
        words.push(NumberWord::tens(rest));
        if rest % 10 > 0 {
            words.push(NumberWord::unit(rest % 10));
        }
    } else {
        words.push(NumberWord::unit(rest));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spoken(number: u32) -> String {
        number_to_words(number)
            .iter()
            .map(|w| w.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_small_numbers() {
        assert_eq!(spoken(0), "zero");
        assert_eq!(spoken(13), "thirteen");
        assert_eq!(spoken(21), "twenty one");
        assert_eq!(spoken(90), "ninety");
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(spoken(100), "one hundred");
        assert_eq!(spoken(101), "one hundred and one");
        assert_eq!(spoken(999), "nine hundred and ninety nine");
    }

    #[test]
    fn test_large_numbers() {
        assert_eq!(spoken(1234), "one thousand two hundred and thirty four");
        assert_eq!(spoken(1_000_000), "one million");
        assert_eq!(spoken(1_005), "one thousand and five");
        assert_eq!(
            spoken(u32::MAX),
            "four billion two hundred and ninety four million nine hundred and sixty seven \
             thousand two hundred and ninety five"
        );
    }

    #[test]
    fn test_vocabulary_lookup() {
        assert_eq!(NumberWord::unit(7), NumberWord::Seven);
        assert_eq!(NumberWord::unit(19), NumberWord::Nineteen);
        assert_eq!(NumberWord::tens(20), NumberWord::Twenty);
        assert_eq!(NumberWord::tens(95), NumberWord::Ninety);
        assert_eq!(NumberWord::And.clip_stem(), "and");
    }
}
