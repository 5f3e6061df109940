//! Fixed clinic data served by the catalog and info endpoints.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ServiceOffering {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Rupiah.
    pub price: u64,
    /// Minutes.
    pub duration: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClinicInfo {
    pub name: &'static str,
    pub tagline: &'static str,
    pub address: &'static str,
    pub phone: &'static str,
    pub whatsapp: &'static str,
    pub hours: ClinicHours,
    pub socials: ClinicSocials,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClinicHours {
    pub mon_fri: &'static str,
    pub sat: &'static str,
    pub sun: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClinicSocials {
    pub instagram: &'static str,
    pub tiktok: &'static str,
}

pub const CLINIC_NAME: &str = "Jambi Skin Centre";

pub fn service_catalog() -> Vec<ServiceOffering> {
    vec![
        ServiceOffering {
            id: "facial-signature",
            name: "Signature Facial",
            description: "Perawatan dasar untuk membersihkan, exfoliasi, dan hidrasi kulit.",
            price: 250_000,
            duration: 60,
        },
        ServiceOffering {
            id: "acne-peel",
            name: "Acne Peel",
            description: "Chemical peeling ringan untuk kulit berjerawat dan berkomedo.",
            price: 350_000,
            duration: 45,
        },
        ServiceOffering {
            id: "laser-bright",
            name: "Laser Brightening",
            description: "Toning laser untuk meratakan warna kulit dan mencerahkan.",
            price: 900_000,
            duration: 30,
        },
        ServiceOffering {
            id: "botox",
            name: "Botox",
            description: "Perawatan untuk mengurangi kerutan halus pada wajah.",
            price: 2_500_000,
            duration: 30,
        },
    ]
}

pub fn clinic_info() -> ClinicInfo {
    ClinicInfo {
        name: CLINIC_NAME,
        tagline: "Perawatan kulit tepercaya di Jambi",
        address: "Jl. Contoh No. 123, Jambi",
        phone: "+62 811-1234-567",
        whatsapp: "+62 811-1234-567",
        hours: ClinicHours {
            mon_fri: "09.00 - 19.00",
            sat: "09.00 - 17.00",
            sun: "Tutup",
        },
        socials: ClinicSocials {
            instagram: "https://instagram.com/jambiskincentre",
            tiktok: "https://tiktok.com/@jambiskincentre",
        },
    }
}
