//! Static country → continent table.
//!
//! Keys are the English country names Scopus writes into
//! `affiliation-country`, plus the common alternates (ISO short names,
//! older spellings). Matching ignores ASCII case and surrounding whitespace.

use crate::error::{OptionExt, Result};
use crate::source::ContinentResolver;

const AFRICA: &str = "Africa";
const ANTARCTICA: &str = "Antarctica";
const ASIA: &str = "Asia";
const EUROPE: &str = "Europe";
const NORTH_AMERICA: &str = "North America";
const OCEANIA: &str = "Oceania";
const SOUTH_AMERICA: &str = "South America";

static COUNTRIES: &[(&str, &str)] = &[
    // Africa
    ("Algeria", AFRICA),
    ("Angola", AFRICA),
    ("Benin", AFRICA),
    ("Botswana", AFRICA),
    ("Burkina Faso", AFRICA),
    ("Burundi", AFRICA),
    ("Cabo Verde", AFRICA),
    ("Cape Verde", AFRICA),
    ("Cameroon", AFRICA),
    ("Central African Republic", AFRICA),
    ("Chad", AFRICA),
    ("Comoros", AFRICA),
    ("Congo", AFRICA),
    ("Democratic Republic Congo", AFRICA),
    ("Democratic Republic of the Congo", AFRICA),
    ("Cote d'Ivoire", AFRICA),
    ("Côte d'Ivoire", AFRICA),
    ("Ivory Coast", AFRICA),
    ("Djibouti", AFRICA),
    ("Egypt", AFRICA),
    ("Equatorial Guinea", AFRICA),
    ("Eritrea", AFRICA),
    ("Eswatini", AFRICA),
    ("Swaziland", AFRICA),
    ("Ethiopia", AFRICA),
    ("Gabon", AFRICA),
    ("Gambia", AFRICA),
    ("Ghana", AFRICA),
    ("Guinea", AFRICA),
    ("Guinea-Bissau", AFRICA),
    ("Kenya", AFRICA),
    ("Lesotho", AFRICA),
    ("Liberia", AFRICA),
    ("Libya", AFRICA),
    ("Libyan Arab Jamahiriya", AFRICA),
    ("Madagascar", AFRICA),
    ("Malawi", AFRICA),
    ("Mali", AFRICA),
    ("Mauritania", AFRICA),
    ("Mauritius", AFRICA),
    ("Morocco", AFRICA),
    ("Mozambique", AFRICA),
    ("Namibia", AFRICA),
    ("Niger", AFRICA),
    ("Nigeria", AFRICA),
    ("Reunion", AFRICA),
    ("Rwanda", AFRICA),
    ("Sao Tome and Principe", AFRICA),
    ("Senegal", AFRICA),
    ("Seychelles", AFRICA),
    ("Sierra Leone", AFRICA),
    ("Somalia", AFRICA),
    ("South Africa", AFRICA),
    ("South Sudan", AFRICA),
    ("Sudan", AFRICA),
    ("Tanzania", AFRICA),
    ("United Republic of Tanzania", AFRICA),
    ("Togo", AFRICA),
    ("Tunisia", AFRICA),
    ("Uganda", AFRICA),
    ("Western Sahara", AFRICA),
    ("Zambia", AFRICA),
    ("Zimbabwe", AFRICA),
    // Antarctica
    ("Antarctica", ANTARCTICA),
    // Asia
    ("Afghanistan", ASIA),
    ("Armenia", ASIA),
    ("Azerbaijan", ASIA),
    ("Bahrain", ASIA),
    ("Bangladesh", ASIA),
    ("Bhutan", ASIA),
    ("Brunei Darussalam", ASIA),
    ("Brunei", ASIA),
    ("Cambodia", ASIA),
    ("China", ASIA),
    ("Georgia", ASIA),
    ("Hong Kong", ASIA),
    ("India", ASIA),
    ("Indonesia", ASIA),
    ("Iran", ASIA),
    ("Islamic Republic of Iran", ASIA),
    ("Iraq", ASIA),
    ("Israel", ASIA),
    ("Japan", ASIA),
    ("Jordan", ASIA),
    ("Kazakhstan", ASIA),
    ("Kuwait", ASIA),
    ("Kyrgyzstan", ASIA),
    ("Laos", ASIA),
    ("Lao People's Democratic Republic", ASIA),
    ("Lebanon", ASIA),
    ("Macao", ASIA),
    ("Macau", ASIA),
    ("Malaysia", ASIA),
    ("Maldives", ASIA),
    ("Mongolia", ASIA),
    ("Myanmar", ASIA),
    ("Nepal", ASIA),
    ("North Korea", ASIA),
    ("Oman", ASIA),
    ("Pakistan", ASIA),
    ("Palestine", ASIA),
    ("Palestinian Territory", ASIA),
    ("Philippines", ASIA),
    ("Qatar", ASIA),
    ("Saudi Arabia", ASIA),
    ("Singapore", ASIA),
    ("South Korea", ASIA),
    ("Korea, Republic of", ASIA),
    ("Republic of Korea", ASIA),
    ("Sri Lanka", ASIA),
    ("Syria", ASIA),
    ("Syrian Arab Republic", ASIA),
    ("Taiwan", ASIA),
    ("Tajikistan", ASIA),
    ("Thailand", ASIA),
    ("Timor-Leste", ASIA),
    ("Turkey", ASIA),
    ("Türkiye", ASIA),
    ("Turkmenistan", ASIA),
    ("United Arab Emirates", ASIA),
    ("Uzbekistan", ASIA),
    ("Viet Nam", ASIA),
    ("Vietnam", ASIA),
    ("Yemen", ASIA),
    // Europe
    ("Albania", EUROPE),
    ("Andorra", EUROPE),
    ("Austria", EUROPE),
    ("Belarus", EUROPE),
    ("Belgium", EUROPE),
    ("Bosnia and Herzegovina", EUROPE),
    ("Bulgaria", EUROPE),
    ("Croatia", EUROPE),
    ("Cyprus", EUROPE),
    ("Czech Republic", EUROPE),
    ("Czechia", EUROPE),
    ("Denmark", EUROPE),
    ("Estonia", EUROPE),
    ("Faroe Islands", EUROPE),
    ("Finland", EUROPE),
    ("France", EUROPE),
    ("Germany", EUROPE),
    ("Gibraltar", EUROPE),
    ("Greece", EUROPE),
    ("Hungary", EUROPE),
    ("Iceland", EUROPE),
    ("Ireland", EUROPE),
    ("Isle of Man", EUROPE),
    ("Italy", EUROPE),
    ("Kosovo", EUROPE),
    ("Latvia", EUROPE),
    ("Liechtenstein", EUROPE),
    ("Lithuania", EUROPE),
    ("Luxembourg", EUROPE),
    ("Malta", EUROPE),
    ("Moldova", EUROPE),
    ("Republic of Moldova", EUROPE),
    ("Monaco", EUROPE),
    ("Montenegro", EUROPE),
    ("Netherlands", EUROPE),
    ("North Macedonia", EUROPE),
    ("Macedonia", EUROPE),
    ("Norway", EUROPE),
    ("Poland", EUROPE),
    ("Portugal", EUROPE),
    ("Romania", EUROPE),
    ("Russian Federation", EUROPE),
    ("Russia", EUROPE),
    ("San Marino", EUROPE),
    ("Serbia", EUROPE),
    ("Slovakia", EUROPE),
    ("Slovenia", EUROPE),
    ("Spain", EUROPE),
    ("Sweden", EUROPE),
    ("Switzerland", EUROPE),
    ("Ukraine", EUROPE),
    ("United Kingdom", EUROPE),
    ("Vatican City State", EUROPE),
    // North America
    ("Antigua and Barbuda", NORTH_AMERICA),
    ("Bahamas", NORTH_AMERICA),
    ("Barbados", NORTH_AMERICA),
    ("Belize", NORTH_AMERICA),
    ("Bermuda", NORTH_AMERICA),
    ("Canada", NORTH_AMERICA),
    ("Costa Rica", NORTH_AMERICA),
    ("Cuba", NORTH_AMERICA),
    ("Dominica", NORTH_AMERICA),
    ("Dominican Republic", NORTH_AMERICA),
    ("El Salvador", NORTH_AMERICA),
    ("Greenland", NORTH_AMERICA),
    ("Grenada", NORTH_AMERICA),
    ("Guadeloupe", NORTH_AMERICA),
    ("Guatemala", NORTH_AMERICA),
    ("Haiti", NORTH_AMERICA),
    ("Honduras", NORTH_AMERICA),
    ("Jamaica", NORTH_AMERICA),
    ("Martinique", NORTH_AMERICA),
    ("Mexico", NORTH_AMERICA),
    ("Nicaragua", NORTH_AMERICA),
    ("Panama", NORTH_AMERICA),
    ("Puerto Rico", NORTH_AMERICA),
    ("Saint Kitts and Nevis", NORTH_AMERICA),
    ("Saint Lucia", NORTH_AMERICA),
    ("Saint Vincent and the Grenadines", NORTH_AMERICA),
    ("Trinidad and Tobago", NORTH_AMERICA),
    ("United States", NORTH_AMERICA),
    ("United States of America", NORTH_AMERICA),
    ("USA", NORTH_AMERICA),
    // Oceania
    ("Australia", OCEANIA),
    ("Fiji", OCEANIA),
    ("French Polynesia", OCEANIA),
    ("Guam", OCEANIA),
    ("Kiribati", OCEANIA),
    ("Marshall Islands", OCEANIA),
    ("Micronesia", OCEANIA),
    ("Nauru", OCEANIA),
    ("New Caledonia", OCEANIA),
    ("New Zealand", OCEANIA),
    ("Palau", OCEANIA),
    ("Papua New Guinea", OCEANIA),
    ("Samoa", OCEANIA),
    ("Solomon Islands", OCEANIA),
    ("Tonga", OCEANIA),
    ("Tuvalu", OCEANIA),
    ("Vanuatu", OCEANIA),
    // South America
    ("Argentina", SOUTH_AMERICA),
    ("Bolivia", SOUTH_AMERICA),
    ("Brazil", SOUTH_AMERICA),
    ("Chile", SOUTH_AMERICA),
    ("Colombia", SOUTH_AMERICA),
    ("Ecuador", SOUTH_AMERICA),
    ("French Guiana", SOUTH_AMERICA),
    ("Guyana", SOUTH_AMERICA),
    ("Paraguay", SOUTH_AMERICA),
    ("Peru", SOUTH_AMERICA),
    ("Suriname", SOUTH_AMERICA),
    ("Uruguay", SOUTH_AMERICA),
    ("Venezuela", SOUTH_AMERICA),
];

/// Continent lookup backed by the built-in table
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticContinentTable;

impl ContinentResolver for StaticContinentTable {
    fn resolve(&self, country: &str) -> Result<String> {
        let wanted = country.trim();
        COUNTRIES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
            .map(|(_, continent)| continent.to_string())
            .ok_or_not_found(&format!("continent for {:?}", country))
    }
}
