//! Reference data compiled into the library.
//!
//! Every store starts with these short surahs, the surah table and a little
//! tafsir, so reading and search keep working before the host has handed
//! over any larger corpus.

use crate::content_model::{HadithBook, SurahInfo, VerseRecord};

pub const TAFSIR_UNAVAILABLE: &str = "Tafsir not available for this verse.";

pub const HADITH_BOOKS: [HadithBook; 6] = [
    HadithBook { id: "bukhari", name: "Sahih al-Bukhari", arabic_name: "صحيح البخاري" },
    HadithBook { id: "muslim", name: "Sahih Muslim", arabic_name: "صحيح مسلم" },
    HadithBook { id: "tirmidhi", name: "Jami` at-Tirmidhi", arabic_name: "جامع الترمذي" },
    HadithBook { id: "abudawud", name: "Sunan Abi Dawud", arabic_name: "سنن أبي داود" },
    HadithBook { id: "ibnmajah", name: "Sunan Ibn Majah", arabic_name: "سنن ابن ماجه" },
    HadithBook { id: "malik", name: "Muwatta Malik", arabic_name: "موطأ مالك" },
];

pub fn hadith_book(id: &str) -> Option<&'static HadithBook> {
    HADITH_BOOKS.iter().find(|book| book.id == id)
}

// (number, name, latin, translation, revelation, verse count)
const SURAHS: [(u16, &str, &str, &str, &str, u16); 17] = [
    (1, "الفاتحة", "Al-Fatihah", "The Opening", "Meccan", 7),
    (2, "البقرة", "Al-Baqarah", "The Cow", "Medinan", 286),
    (3, "آل عمران", "Ali 'Imran", "Family of Imran", "Medinan", 200),
    (4, "النساء", "An-Nisa", "The Women", "Medinan", 176),
    (5, "المائدة", "Al-Ma'idah", "The Table Spread", "Medinan", 120),
    (6, "الأنعام", "Al-An'am", "The Cattle", "Meccan", 165),
    (7, "الأعراف", "Al-A'raf", "The Heights", "Meccan", 206),
    (8, "الأنفال", "Al-Anfal", "The Spoils of War", "Medinan", 75),
    (9, "التوبة", "At-Tawbah", "The Repentance", "Medinan", 129),
    (10, "يونس", "Yunus", "Jonah", "Meccan", 109),
    (36, "يس", "Ya-Sin", "Ya Sin", "Meccan", 83),
    (55, "الرحمن", "Ar-Rahman", "The Beneficent", "Medinan", 78),
    (56, "الواقعة", "Al-Waqi'ah", "The Inevitable", "Meccan", 96),
    (67, "الملك", "Al-Mulk", "The Sovereignty", "Meccan", 30),
    (112, "الإخلاص", "Al-Ikhlas", "Sincerity", "Meccan", 4),
    (113, "الفلق", "Al-Falaq", "The Daybreak", "Meccan", 5),
    (114, "الناس", "An-Nas", "Mankind", "Meccan", 6),
];

pub fn surahs() -> Vec<SurahInfo> {
    SURAHS
        .iter()
        .map(|&(number, name, latin, translation, revelation, verse_count)| SurahInfo {
            number,
            name: name.to_string(),
            name_latin: latin.to_string(),
            name_translation: translation.to_string(),
            revelation_type: revelation.to_string(),
            verse_count,
        })
        .collect()
}

// (surah, verse, text, translation, transliteration)
const VERSES: [(u16, u16, &str, &str, &str); 22] = [
    (1, 1, "بِسْمِ ٱللَّهِ ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ", "In the name of Allah, the Entirely Merciful, the Especially Merciful.", "Bismillahir rahmanir raheem"),
    (1, 2, "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَـٰلَمِينَ", "All praise is due to Allah, Lord of the worlds.", "Alhamdu lillahi rabbil alamin"),
    (1, 3, "ٱلرَّحْمَـٰنِ ٱلرَّحِيمِ", "The Entirely Merciful, the Especially Merciful,", "Ar-Rahmanir Raheem"),
    (1, 4, "مَـٰلِكِ يَوْمِ ٱلدِّينِ", "Sovereign of the Day of Recompense.", "Maliki yawmid deen"),
    (1, 5, "إِيَّاكَ نَعْبُدُ وَإِيَّاكَ نَسْتَعِينُ", "It is You we worship and You we ask for help.", "Iyyaka nabudu wa iyyaka nastaeen"),
    (1, 6, "ٱهْدِنَا ٱلصِّرَٰطَ ٱلْمُسْتَقِيمَ", "Guide us to the straight path -", "Ihdinas siratal mustaqeem"),
    (1, 7, "صِرَٰطَ ٱلَّذِينَ أَنْعَمْتَ عَلَيْهِمْ غَيْرِ ٱلْمَغْضُوبِ عَلَيْهِمْ وَلَا ٱلضَّآلِّينَ", "The path of those upon whom You have bestowed favor, not of those who have earned [Your] anger or of those who are astray.", "Siratal lazeena anamta alaihim, ghairil maghdubi alaihim wa lad daalleen"),
    (112, 1, "قُلْ هُوَ ٱللَّهُ أَحَدٌ", "Say, \"He is Allah, [who is] One,\"", "Qul huwa Allahu ahad"),
    (112, 2, "ٱللَّهُ ٱلصَّمَدُ", "Allah, the Eternal Refuge.", "Allahu as-samad"),
    (112, 3, "لَمْ يَلِدْ وَلَمْ يُولَدْ", "He neither begets nor is born,", "Lam yalid wa lam yoolad"),
    (112, 4, "وَلَمْ يَكُن لَّهُۥ كُفُوًا أَحَدٌۢ", "Nor is there to Him any equivalent.\"", "Wa lam yakun lahu kufuwan ahad"),
    (113, 1, "قُلْ أَعُوذُ بِرَبِّ ٱلْفَلَقِ", "Say, \"I seek refuge in the Lord of daybreak", "Qul audhu bi rabbil-falaq"),
    (113, 2, "مِن شَرِّ مَا خَلَقَ", "From the evil of that which He created", "Min sharri ma khalaq"),
    (113, 3, "وَمِن شَرِّ غَاسِقٍ إِذَا وَقَبَ", "And from the evil of darkness when it settles", "Wa min sharri ghasiqin idha waqab"),
    (113, 4, "وَمِن شَرِّ ٱلنَّفَّـٰثَـٰتِ فِى ٱلْعُقَدِ", "And from the evil of the blowers in knots", "Wa min sharrin-naffathati fil uqad"),
    (113, 5, "وَمِن شَرِّ حَاسِدٍ إِذَا حَسَدَ", "And from the evil of an envier when he envies.", "Wa min sharri hasidin idha hasad"),
    (114, 1, "قُلْ أَعُوذُ بِرَبِّ ٱلنَّاسِ", "Say, \"I seek refuge in the Lord of mankind,", "Qul audhu bi rabbin-nas"),
    (114, 2, "مَلِكِ ٱلنَّاسِ", "The Sovereign of mankind,", "Malikin-nas"),
    (114, 3, "إِلَـٰهِ ٱلنَّاسِ", "The God of mankind,", "Ilahin-nas"),
    (114, 4, "مِن شَرِّ ٱلْوَسْوَاسِ ٱلْخَنَّاسِ", "From the evil of the retreating whisperer -", "Min sharril-waswasil-khannas"),
    (114, 5, "ٱلَّذِى يُوَسْوِسُ فِى صُدُورِ ٱلنَّاسِ", "Who whispers [evil] into the breasts of mankind -", "Alladhi yuwaswisu fi sudurin-nas"),
    (114, 6, "مِنَ ٱلْجِنَّةِ وَٱلنَّاسِ", "From among the jinn and mankind.", "Minal-jinnati wan-nas"),
];

pub fn verses() -> Vec<VerseRecord> {
    VERSES
        .iter()
        .map(|&(surah, verse, text, translation, transliteration)| {
            VerseRecord::new(surah, verse, text, translation).with_transliteration(transliteration)
        })
        .collect()
}

const TAFSIR: [(&str, &str); 11] = [
    ("1:1", "This verse is known as the Basmalah. It is recommended to begin all actions with this phrase. It acknowledges that everything we do is with the help of Allah, who is characterized by His abundant mercy to all creation (Ar-Rahman) and His specific mercy to the believers (Ar-Raheem)."),
    ("1:2", "This verse establishes that all praise belongs to Allah alone, who is the Lord, Creator, Sustainer, and Nourisher of everything that exists. The term 'worlds' refers to all of creation, including humans, jinn, angels, and all that exists in the heavens and earth."),
    ("1:3", "This verse reaffirms Allah's attributes of mercy. Ar-Rahman refers to His mercy that encompasses all creation, while Ar-Raheem refers to His special mercy reserved for the believers in the Hereafter."),
    ("1:4", "This verse establishes Allah's absolute sovereignty on the Day of Judgment, when all souls will be held accountable for their deeds. On that day, no one will have any authority except Allah, who will judge with perfect justice."),
    ("1:5", "This verse represents the essence of Islamic monotheism: worship and seeking help are directed solely to Allah. It establishes the direct relationship between the servant and Allah, without any intermediaries."),
    ("1:6", "This verse teaches believers to ask Allah for guidance to the straight path, which is the path of Islam, the path of truth and righteousness."),
    ("1:7", "This verse clarifies that the straight path is the path of those whom Allah has blessed, not the path of those who have earned Allah's anger or those who have gone astray."),
    ("112:1", "This verse establishes the absolute oneness of Allah (Tawhid), which is the foundation of Islamic monotheism. It refutes any notion of plurality within the divine nature."),
    ("112:2", "This verse describes Allah as 'As-Samad', which means the one upon whom all depend while He depends on none. He is the ultimate source of all sustenance."),
    ("112:3", "This verse negates any notion of Allah having offspring or being born, refuting the beliefs of those who attribute children to Allah or claim that He came into existence."),
    ("112:4", "This verse completes the concept of Tawhid by affirming that there is nothing comparable to Allah in His essence, attributes, or actions."),
];

pub fn tafsir(verse_key: &str) -> Option<&'static str> {
    TAFSIR
        .iter()
        .find(|(key, _)| *key == verse_key)
        .map(|(_, text)| *text)
}
