//! Offline description templates.
//!
//! A frozen table keyed by language code, then tone code. Missing languages
//! resolve to English and missing tones to `professional`, so every lookup
//! lands on some entry. Adding a language or tone is a data change here.

use crate::form::FormState;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_TONE: &str = "professional";

/// One paragraph with `{product}` and `{features}` slots. `features_clause`
/// fills the `{features}` slot of `body` and has its own `{features}` slot for
/// the lower-cased feature list.
#[derive(Debug)]
pub struct ToneTemplate {
    pub body: &'static str,
    pub features_clause: &'static str,
}

#[derive(Debug)]
pub struct LanguageTemplates {
    pub code: &'static str,
    pub tones: &'static [(&'static str, ToneTemplate)],
}

static ENGLISH: LanguageTemplates = LanguageTemplates {
    code: "en",
    tones: &[
        ("professional", ToneTemplate {
            body: "Introducing the {product} - a premium solution designed for discerning customers who value quality and performance. {features}this exceptional product combines innovative design with practical functionality. Crafted with attention to detail and built to last, it represents the perfect balance of style and substance. Experience the difference that quality makes with this outstanding addition to your collection.",
            features_clause: "Featuring {features}, ",
        }),
        ("casual", ToneTemplate {
            body: "Meet the {product} - your new favorite thing! {features}this awesome product is exactly what you've been looking for. It's super easy to use, looks great, and just works perfectly. Whether you're treating yourself or finding the perfect gift, this is definitely a winner. Get ready to love it!",
            features_clause: "With {features}, ",
        }),
        ("luxury", ToneTemplate {
            body: "Discover the exquisite {product} - an embodiment of sophistication and refined taste. {features}this distinguished piece represents the pinnacle of luxury and exclusivity. Each detail has been carefully considered to deliver an unparalleled experience that exceeds the highest expectations. Indulge in the extraordinary with this remarkable masterpiece.",
            features_clause: "Meticulously crafted with {features}, ",
        }),
    ],
};

static SPANISH: LanguageTemplates = LanguageTemplates {
    code: "es",
    tones: &[
        ("professional", ToneTemplate {
            body: "Presentamos el {product} - una solución premium diseñada para clientes exigentes que valoran la calidad y el rendimiento. {features}este producto excepcional combina diseño innovador con funcionalidad práctica. Elaborado con atención al detalle y construido para durar, representa el equilibrio perfecto entre estilo y sustancia.",
            features_clause: "Con {features}, ",
        }),
        ("casual", ToneTemplate {
            body: "¡Conoce el {product} - tu nueva cosa favorita! {features}este increíble producto es exactamente lo que has estado buscando. Es súper fácil de usar, se ve genial y funciona perfectamente. Ya sea que te consientas o busques el regalo perfecto, ¡definitivamente es un ganador!",
            features_clause: "Con {features}, ",
        }),
        ("luxury", ToneTemplate {
            body: "Descubre el exquisito {product} - una encarnación de sofisticación y gusto refinado. {features}esta pieza distinguida representa el pináculo del lujo y la exclusividad. Cada detalle ha sido cuidadosamente considerado para ofrecer una experiencia sin igual.",
            features_clause: "Meticulosamente elaborado con {features}, ",
        }),
    ],
};

static FRENCH: LanguageTemplates = LanguageTemplates {
    code: "fr",
    tones: &[
        ("professional", ToneTemplate {
            body: "Découvrez le {product} - une solution premium conçue pour les clients exigeants qui valorisent la qualité et la performance. {features}ce produit exceptionnel combine un design innovant avec une fonctionnalité pratique. Fabriqué avec attention aux détails et conçu pour durer, il représente l'équilibre parfait entre style et substance.",
            features_clause: "Doté de {features}, ",
        }),
        ("casual", ToneTemplate {
            body: "Rencontrez le {product} - votre nouvelle chose préférée! {features}ce produit génial est exactement ce que vous cherchiez. Il est super facile à utiliser, a l'air génial et fonctionne parfaitement. Que vous vous fassiez plaisir ou que vous trouviez le cadeau parfait, c'est définitivement un gagnant!",
            features_clause: "Avec {features}, ",
        }),
        ("luxury", ToneTemplate {
            body: "Découvrez l'exquis {product} - une incarnation de sophistication et de goût raffiné. {features}cette pièce distinguée représente le summum du luxe et de l'exclusivité. Chaque détail a été soigneusement considéré pour offrir une expérience inégalée.",
            features_clause: "Méticuleusement conçu avec {features}, ",
        }),
    ],
};

static TABLE: &[&LanguageTemplates] = &[&ENGLISH, &SPANISH, &FRENCH];

pub fn languages() -> impl Iterator<Item = &'static str> {
    TABLE.iter().map(|l| l.code)
}

fn find_tone(lang: &'static LanguageTemplates, tone: &str) -> Option<&'static ToneTemplate> {
    lang.tones.iter().find(|(code, _)| *code == tone).map(|(_, t)| t)
}

/// Resolve `(language, tone)` with the default-key fallbacks applied.
pub fn lookup(language: &str, tone: &str) -> &'static ToneTemplate {
    let lang = TABLE
        .iter()
        .copied()
        .find(|l| l.code == language)
        .unwrap_or(&ENGLISH);
    find_tone(lang, tone)
        .or_else(|| find_tone(lang, DEFAULT_TONE))
        .unwrap_or(&ENGLISH.tones[0].1)
}

/// Fill `{name}` slots in one pass; inserted values are never rescanned.
fn fill(template: &str, value_for: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match value_for(key) {
                    Some(v) => out.push_str(&v),
                    None => out.push_str(&rest[open..open + close + 2]),
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

impl ToneTemplate {
    pub fn render(&self, product_name: &str, product_features: &str) -> String {
        let clause = if product_features.is_empty() {
            String::new()
        } else {
            let lowered = product_features.to_lowercase();
            fill(self.features_clause, |k| (k == "features").then(|| lowered.clone()))
        };
        fill(self.body, |k| match k {
            "product" => Some(product_name.to_string()),
            "features" => Some(clause.clone()),
            _ => None,
        })
    }
}

/// Render by raw codes; unknown codes take the default entries.
pub fn render(language: &str, tone: &str, product_name: &str, product_features: &str) -> String {
    lookup(language, tone).render(product_name, product_features)
}

/// Fallback text for a form. An unselected tone renders as `professional`.
pub fn render_form(form: &FormState) -> String {
    let tone = form.tone.map(|t| t.as_str()).unwrap_or(DEFAULT_TONE);
    render(form.language.code(), tone, &form.product_name, &form.product_features)
}
