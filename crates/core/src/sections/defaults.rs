//! Compiled-in section defaults.
//!
//! These are served verbatim for a section until its first admin write.

use super::general::{
    ContactInfo, CtaContent, GeneralSettings, HeroContent, HeroStat, SectionTitles, SocialMedia,
    TrustBadge,
};
use super::{
    CoverageSettings, ExtraFields, Package, PackagesSettings, Testimonial, TestimonialsSettings,
    WhyChooseItem, WhyChooseSettings,
};

/// Registry of default values, one per section type.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionDefaults {
    pub general: GeneralSettings,
    pub packages: PackagesSettings,
    pub testimonials: TestimonialsSettings,
    pub coverage: CoverageSettings,
    pub why_choose: WhyChooseSettings,
}

impl Default for SectionDefaults {
    fn default() -> Self {
        Self::builtin()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn stat(value: &str, label: &str) -> HeroStat {
    HeroStat {
        value: value.to_owned(),
        label: label.to_owned(),
        extra: ExtraFields::new(),
    }
}

fn badge(value: &str, label: &str) -> TrustBadge {
    TrustBadge {
        value: value.to_owned(),
        label: label.to_owned(),
        extra: ExtraFields::new(),
    }
}

#[allow(clippy::too_many_arguments)]
fn package(
    id: i64,
    name: &str,
    category: &str,
    speed: &str,
    price: &str,
    features: &[&str],
    popular: bool,
    image: &str,
) -> Package {
    Package {
        id,
        name: name.to_owned(),
        category: category.to_owned(),
        speed: speed.to_owned(),
        price: price.to_owned(),
        features: strings(features),
        popular,
        image: image.to_owned(),
        extra: ExtraFields::new(),
    }
}

fn testimonial(id: i64, name: &str, role: &str, text: &str) -> Testimonial {
    Testimonial {
        id,
        name: name.to_owned(),
        role: role.to_owned(),
        rating: 5,
        text: text.to_owned(),
        image: format!(
            "https://ui-avatars.com/api/?name={}&background=1e3a8a&color=fff&size=128",
            name.replace(' ', "+")
        ),
        extra: ExtraFields::new(),
    }
}

fn highlight(id: i64, title: &str, description: &str, icon: &str) -> WhyChooseItem {
    WhyChooseItem {
        id,
        title: title.to_owned(),
        description: description.to_owned(),
        icon: icon.to_owned(),
        extra: ExtraFields::new(),
    }
}

impl SectionDefaults {
    /// The product's stock content.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            general: builtin_general(),
            packages: PackagesSettings {
                packages: vec![
                    package(
                        1,
                        "Internet Rumah",
                        "home",
                        "50 Mbps",
                        "249.000",
                        &["Unlimited Kuota", "Free Instalasi", "Support 24/7", "Cocok untuk 4-6 Perangkat"],
                        false,
                        "https://images.unsplash.com/photo-1750711158632-5273ec9b9b86",
                    ),
                    package(
                        2,
                        "Internet Bisnis",
                        "business",
                        "100 Mbps",
                        "499.000",
                        &["Unlimited Kuota", "Prioritas Support", "IP Publik (Opsional)", "Cocok untuk 10-15 Perangkat"],
                        true,
                        "https://images.unsplash.com/photo-1768796371784-3ad0bf2723a0",
                    ),
                    package(
                        3,
                        "Dedicated Corporate",
                        "corporate",
                        "200 Mbps",
                        "1.299.000",
                        &["Bandwidth Dedicated", "SLA 99.9%", "Priority Support 24/7", "IP Publik & VPN"],
                        false,
                        "https://images.unsplash.com/photo-1597733336794-12d05021d510",
                    ),
                ],
                extra: ExtraFields::new(),
            },
            testimonials: TestimonialsSettings {
                testimonials: vec![
                    testimonial(
                        1,
                        "Budi Santoso",
                        "Pemilik Warung Kopi",
                        "Pelanggan di warung kopi saya sangat puas dengan WiFi dari QWINNET. Cepat dan stabil, bahkan saat ramai!",
                    ),
                    testimonial(
                        2,
                        "Siti Nurhaliza",
                        "Ibu Rumah Tangga",
                        "Anak-anak bisa sekolah online dengan lancar. Harga terjangkau dan customer service ramah banget!",
                    ),
                    testimonial(
                        3,
                        "Agus Wijaya",
                        "Digital Marketing Agency",
                        "Sudah 2 tahun pakai QWINNET untuk kantor. Upload download kencang, meeting online lancar jaya!",
                    ),
                ],
                extra: ExtraFields::new(),
            },
            coverage: CoverageSettings {
                areas: strings(&[
                    "Jakarta Selatan",
                    "Jakarta Barat",
                    "Tangerang",
                    "Depok",
                    "Bekasi",
                    "Bandung",
                ]),
                extra: ExtraFields::new(),
            },
            why_choose: WhyChooseSettings {
                items: vec![
                    highlight(
                        1,
                        "Kecepatan Stabil",
                        "Koneksi internet super cepat dan konsisten untuk semua aktivitas online Anda",
                        "zap",
                    ),
                    highlight(
                        2,
                        "Jaringan Andal",
                        "Infrastruktur fiber optik dengan teknologi terkini untuk reliability maksimal",
                        "wifi",
                    ),
                    highlight(
                        3,
                        "Support Responsif",
                        "Tim technical support siap membantu Anda 24/7 dengan respons time cepat",
                        "headphones",
                    ),
                    highlight(
                        4,
                        "Harga Transparan",
                        "Tanpa biaya tersembunyi, harga yang Anda lihat adalah harga yang Anda bayar",
                        "shield-check",
                    ),
                ],
                extra: ExtraFields::new(),
            },
        }
    }
}

fn builtin_general() -> GeneralSettings {
    GeneralSettings {
        company_name: Some("QWINNET".to_owned()),
        hero: Some(HeroContent {
            title: "Internet Cepat, Stabil, Tanpa Ribet".to_owned(),
            subtitle: "Solusi internet handal untuk rumah dan bisnis Anda dengan kecepatan maksimal dan harga terjangkau".to_owned(),
            badge_text: "Provider Internet Terpercaya".to_owned(),
            cta_primary: "Cek Jangkauan".to_owned(),
            cta_secondary: "Hubungi Kami".to_owned(),
            stats: Some(vec![
                stat("10K+", "Pelanggan Puas"),
                stat("99.9%", "Uptime Guarantee"),
                stat("24/7", "Customer Support"),
            ]),
            extra: ExtraFields::new(),
        }),
        contact: Some(ContactInfo {
            whatsapp: "6281234567890".to_owned(),
            phone: "+62 812-3456-7890".to_owned(),
            email: "info@qwinnet.id".to_owned(),
            address: "Jl. Sudirman No. 123, Jakarta Selatan, 12190".to_owned(),
            extra: ExtraFields::new(),
        }),
        social_media: Some(SocialMedia {
            facebook: "https://facebook.com".to_owned(),
            instagram: "https://instagram.com".to_owned(),
            twitter: "https://twitter.com".to_owned(),
            extra: ExtraFields::new(),
        }),
        footer_text: Some(
            "Provider internet terpercaya yang menghadirkan koneksi cepat, stabil, dan terjangkau untuk rumah dan bisnis Anda.".to_owned(),
        ),
        cta: Some(CtaContent {
            title: "Siap Upgrade Internet Anda Hari Ini?".to_owned(),
            subtitle: "Bergabunglah dengan ribuan pelanggan yang sudah merasakan internet cepat dan stabil bersama QWINNET".to_owned(),
            features: strings(&["Free Instalasi", "Tanpa Biaya Tersembunyi", "Support 24/7"]),
            extra: ExtraFields::new(),
        }),
        sections: Some(SectionTitles {
            packages_title: "Paket Internet Kami".to_owned(),
            packages_subtitle: "Pilih paket yang sesuai dengan kebutuhan Anda, dari rumahan hingga korporat".to_owned(),
            testimonials_title: "Apa Kata Pelanggan Kami?".to_owned(),
            testimonials_subtitle: "Ribuan pelanggan telah mempercayai QWINNET untuk kebutuhan internet mereka".to_owned(),
            coverage_title: "Area Jangkauan Kami".to_owned(),
            coverage_subtitle: "Kami terus memperluas jaringan QWINNET untuk menjangkau lebih banyak area".to_owned(),
            why_choose_title: "Kenapa Pilih QWINNET?".to_owned(),
            why_choose_subtitle: "Kami berkomitmen memberikan layanan internet terbaik dengan berbagai keunggulan".to_owned(),
            extra: ExtraFields::new(),
        }),
        trust_badges: Some(vec![
            badge("4.9/5", "Rating Pelanggan"),
            badge("10K+", "Pelanggan Aktif"),
            badge("5 Tahun", "Pengalaman"),
            badge("99.9%", "Kepuasan"),
        ]),
        extra: ExtraFields::new(),
    }
}
