//! Demo data
//!
//! Five clubs, three partners with their programs, ten memberships and two
//! usage logs. Ali Bin Abu holds five memberships and Qisti three, so the
//! identity lookup has multi-club cases to work with.

use chrono::{Duration, NaiveDate, Utc};
use shared::models::{BenefitPartner, Club, Member, MemberStatus, Program, UsageLog};

use super::PortalData;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn club(
    id: &str,
    name: &str,
    code: &str,
    pic_name: &str,
    pic_phone: &str,
    email: &str,
    state: &str,
    benefits: &[&str],
    terms: &[&str],
) -> Club {
    Club {
        id: id.into(),
        name: name.into(),
        code: code.into(),
        pic_name: pic_name.into(),
        pic_phone: pic_phone.into(),
        email: email.into(),
        state: state.into(),
        benefits: strings(benefits),
        terms: strings(terms),
    }
}

fn program(id: &str, name: &str, benefits: &[&str], terms: &[&str]) -> Program {
    Program {
        id: id.into(),
        name: name.into(),
        benefits: strings(benefits),
        terms: strings(terms),
    }
}

/// Contact details shared by every membership of one person
struct Person {
    full_name: &'static str,
    ic_no: &'static str,
    email: &'static str,
    phone: &'static str,
    address: &'static str,
    photo: &'static str,
    age: u32,
}

const ALI: Person = Person {
    full_name: "Ali Bin Abu",
    ic_no: "850101-10-5555",
    email: "ali@gmail.com",
    phone: "0123456789",
    address: "123 Jalan Ampang",
    photo: "https://picsum.photos/150",
    age: 39,
};

const CHONG: Person = Person {
    full_name: "Chong Wei Lee",
    ic_no: "900505-14-1234",
    email: "chong@yahoo.com",
    phone: "0167788990",
    address: "45 Jalan Damansara",
    photo: "https://picsum.photos/151",
    age: 34,
};

const MUTHU: Person = Person {
    full_name: "Muthu A/L Sami",
    ic_no: "881212-05-9876",
    email: "muthu@gmail.com",
    phone: "0191122334",
    address: "78 Taman Melati",
    photo: "https://picsum.photos/152",
    age: 36,
};

const QISTI: Person = Person {
    full_name: "Muhammad Qisti Amaluddin Bin Mohd Rozaini",
    ic_no: "031212-06-0403",
    email: "qisti@gmail.com",
    phone: "01122334455",
    address: "No 5, Lorong 3, Taman Setia",
    photo: "https://picsum.photos/153",
    age: 21,
};

fn membership(
    id: &str,
    person: &Person,
    club_id: &str,
    status: MemberStatus,
    applied: NaiveDate,
    approved: Option<NaiveDate>,
) -> Member {
    Member {
        id: id.into(),
        full_name: person.full_name.into(),
        ic_no: person.ic_no.into(),
        email: person.email.into(),
        phone: person.phone.into(),
        address: person.address.into(),
        club_id: club_id.into(),
        status,
        applied_date: applied,
        approved_date: approved,
        profile_pic_url: person.photo.into(),
        staff_id_url: String::new(),
        age: person.age,
    }
}

pub fn clubs() -> Vec<Club> {
    vec![
        club(
            "c1",
            "Kelab Sukan JKR",
            "JKR-001",
            "Ahmad Albab",
            "0123456789",
            "jkr@club.my",
            "Selangor",
            &[
                "Akses Gelanggang Badminton JKR",
                "Subsidi Yuran Kejohanan",
                "Takaful Kelompok",
            ],
            &["Wajib kakitangan JKR", "Yuran tahunan RM50"],
        ),
        club(
            "c2",
            "Kelab Kebajikan Guru",
            "KKG-002",
            "Siti Nurhaliza",
            "0198765432",
            "guru@club.my",
            "Kuala Lumpur",
            &[
                "Bantuan Khairat Kematian",
                "Hari Keluarga Tahunan",
                "Diskaun Buku",
            ],
            &["Guru berdaftar sahaja"],
        ),
        club(
            "c3",
            "Persatuan Belia Cyberjaya",
            "PBC-003",
            "Jason Lo",
            "0112233445",
            "cyber@club.my",
            "Selangor",
            &[],
            &[],
        ),
        club(
            "c4",
            "Kelab Kakitangan SUK Pahang",
            "SUK-004",
            "En. Razak",
            "0134455667",
            "suk@pahang.gov.my",
            "Pahang",
            &["Gym Percuma", "Kafeteria Subsidi"],
            &["Kakitangan SUK Pahang"],
        ),
        club(
            "c5",
            "Majlis Sukan Daerah Kuantan",
            "MSDK-005",
            "Pn. Salmah",
            "0145566778",
            "msdk@kuantan.gov.my",
            "Pahang",
            &[],
            &[],
        ),
    ]
}

pub fn partners() -> Vec<BenefitPartner> {
    vec![
        BenefitPartner {
            id: "p1".into(),
            company_name: "Hotel Seri Malaysia".into(),
            description: "Accommodation Provider".into(),
            offers: strings(&["20% off rooms", "Free Breakfast", "Late Checkout"]),
            location: "Nationwide".into(),
            programs: vec![
                program(
                    "prog-1",
                    "Platinum Club Rewards",
                    &[
                        "Sarapan Percuma (2 Pax)",
                        "Late Check-out 3PM",
                        "Welcome Drink",
                    ],
                    &[
                        "Minima penginapan 2 malam",
                        "Tidak sah pada cuti umum",
                        "Wajib tunjuk e-Kad",
                    ],
                ),
                program(
                    "prog-2",
                    "Gold Stay Package",
                    &["Diskaun 10% F&B", "Free Parking"],
                    &["Weekday stays only"],
                ),
            ],
        },
        BenefitPartner {
            id: "p2".into(),
            company_name: "Klinik Mediviron".into(),
            description: "Healthcare".into(),
            offers: strings(&["10% consultation", "Free Basic Checkup"]),
            location: "Selangor".into(),
            programs: vec![program(
                "prog-3",
                "Corporate Wellness",
                &[
                    "Diskaun 10% Konsultasi",
                    "Pemeriksaan Kesihatan Asas Percuma",
                ],
                &["Temujanji diperlukan"],
            )],
        },
        BenefitPartner {
            id: "p3".into(),
            company_name: "Sport Planet".into(),
            description: "Sports Venue".into(),
            offers: strings(&["RM5 off booking", "Free Equipment Rental"]),
            location: "Kuala Lumpur".into(),
            programs: vec![],
        },
    ]
}

pub fn members() -> Vec<Member> {
    use MemberStatus::*;
    vec![
        membership("m1", &ALI, "c1", Active, date(2023, 1, 1), Some(date(2023, 1, 5))),
        membership("m2", &CHONG, "c2", Pending, date(2023, 10, 25), None),
        membership("m3", &MUTHU, "c1", Rejected, date(2023, 9, 15), None),
        membership("m4", &QISTI, "c1", Active, date(2023, 11, 20), Some(date(2023, 11, 21))),
        membership("m5", &ALI, "c2", Active, date(2023, 2, 1), Some(date(2023, 2, 10))),
        membership("m6", &ALI, "c3", Pending, date(2023, 3, 15), None),
        // Active without a recorded approval date
        membership("m7", &ALI, "c4", Active, date(2023, 4, 10), None),
        membership("m8", &ALI, "c5", Expired, date(2022, 1, 1), None),
        membership("m9", &QISTI, "c2", Active, date(2023, 11, 25), Some(date(2023, 11, 26))),
        membership("m10", &QISTI, "c3", Pending, date(2023, 12, 1), None),
    ]
}

/// Usage logs, newest first, relative to now
pub fn usage_logs() -> Vec<UsageLog> {
    let now = Utc::now();
    vec![
        UsageLog {
            id: "l1".into(),
            member_id: "m1".into(),
            partner_id: "p1".into(),
            timestamp: now,
            benefit_type: "Room Discount".into(),
            location: "Hotel Seri Malaysia Melaka".into(),
        },
        UsageLog {
            id: "l2".into(),
            member_id: "m1".into(),
            partner_id: "p3".into(),
            timestamp: now - Duration::days(1),
            benefit_type: "Badminton Court".into(),
            location: "Sport Planet Ampang".into(),
        },
    ]
}

pub fn demo_data() -> PortalData {
    PortalData {
        clubs: clubs(),
        members: members(),
        partners: partners(),
        enrollments: Vec::new(),
        usage_logs: usage_logs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_counts() {
        let data = demo_data();
        assert_eq!(data.clubs.len(), 5);
        assert_eq!(data.partners.len(), 3);
        assert_eq!(data.members.len(), 10);
        assert_eq!(data.usage_logs.len(), 2);
        let programs: usize = data.partners.iter().map(|p| p.programs.len()).sum();
        assert_eq!(programs, 3);
    }

    #[test]
    fn test_seed_members_reference_seed_clubs() {
        let data = demo_data();
        for m in &data.members {
            assert!(data.clubs.iter().any(|c| c.id == m.club_id), "{}", m.id);
        }
    }

    #[test]
    fn test_only_active_members_carry_approval_dates() {
        for m in members() {
            if m.approved_date.is_some() {
                assert_eq!(m.status, MemberStatus::Active, "{}", m.id);
            }
        }
    }
}
