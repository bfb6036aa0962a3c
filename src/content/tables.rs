//! Static content the generator draws from.

pub const LANGUAGES: [&str; 14] = [
    "Python",
    "JavaScript",
    "Java",
    "C++",
    "C#",
    "PHP",
    "Ruby",
    "Swift",
    "Kotlin",
    "Go",
    "Rust",
    "TypeScript",
    "Dart",
    "SQL",
];

pub const TOPICS: [&str; 16] = [
    "Sun'iy intellekt",
    "Machine Learning",
    "Data Science",
    "Veb dasturlash",
    "Mobil dasturlash",
    "Kiberxavfsizlik",
    "Bulutli texnologiyalar",
    "Blockchain",
    "DevOps",
    "Ma'lumotlar bazasi",
    "API",
    "Microservices",
    "Testlash",
    "Git va GitHub",
    "Algoritmlar",
    "Ma'lumotlar tuzilmasi",
];

pub const FACTS: [&str; 10] = [
    "Birinchi kompyuter dasturchisi ayol edi: Ada Lovelace (1840)",
    "Python dasturlash tili Monty Python guruhidan ilhomlangan",
    "JavaScript 10 kunda yaratilgan!",
    "Git dastlab Linux yadrosi uchun yaratilgan",
    "Stack Overflow'da eng ko'p so'raladigan til JavaScript",
    "Java dastlab interaktiv televidenie uchun yaratilgan",
    "Google dastlab 'Backrub' deb nomlangan",
    "Birinchi kompyuter virusi 1983 yilda yaratilgan",
    "HTML emoji-larni qo'llab-quvvatlaydi: 😊",
    "GitHub dunyodagi eng katta kod ombori",
];

pub const TIPS: [&str; 10] = [
    "Har kuni kamida 30 daqiqa kod yozing",
    "Git dan muntazam foydalaning",
    "Stack Overflow dan foydalanishdan qo'rqmang",
    "Kod o'qish - kod yozish kabi muhim",
    "Yangi texnologiyalarni o'rganishda davom eting",
    "Open Source loyihalarda qatnashing",
    "IT community ga qo'shiling",
    "Ingliz tilini o'rganing - bu juda muhim",
    "Algoritmlarni mukammal o'rganing",
    "Yaxshi dokumentatsiya yozishni o'rganing",
];

pub const QUOTES: [&str; 6] = [
    "Yaxshi kod - bu o'z-o'zidan dokumentatsiya - *Unknown*",
    "Har qandaxona ahmoq kompyuter tushunadigan kod yozishi mumkin. Yaxshi dasturchilar esa odamlar tushunadigan kod yozadi - *Martin Fowler*",
    "Birinchi marta ishlaydigan kodingizni ko'rishdek zavq yo'q - *Unknown*",
    "Dasturlash - bu san'at - *Unknown*",
    "Talk is cheap. Show me the code - *Linus Torvalds*",
    "Code is like humor. When you have to explain it, it's bad - *Cory House*",
];

pub const JOKES: [&str; 7] = [
    "Why do programmers prefer dark mode? Because light attracts bugs! 🐛",
    "There are only 10 types of people in the world: those who understand binary and those who don't",
    "SQL injection into my life, I get 'complete' error",
    "I would tell you a UDP joke, but you might not get it",
    "Why do Java developers wear glasses? Because they can't C#",
    "A QA engineer walks into a bar. Runs into a bar. Crawls into a bar. Dances into a bar...",
    "\\['hip', 'hip'] (hip hip array!)",
];

pub const LANGUAGE_INFO: [(&str, &str); 5] = [
    (
        "Python",
        "• Oson o'rganiladi\n• Data Science va AI uchun eng yaxshi\n• Django, Flask frameworklari",
    ),
    (
        "JavaScript",
        "• Veb dasturlash uchun asosiy til\n• React, Vue, Angular frameworklari\n• Frontend va Backend (Node.js)",
    ),
    (
        "Java",
        "• Android dasturlash\n• Katta korxona loyihalari\n• Spring framework",
    ),
    (
        "C++",
        "• O'yinlar va tizim dasturlari\n• Yuqori tezlik\n• Unreal Engine",
    ),
    (
        "C#",
        "• .NET platformasi\n• Windows dasturlari\n• Unity o'yinlar uchun",
    ),
];

pub const TOPIC_INFO: [(&str, &str); 5] = [
    (
        "Sun'iy intellekt",
        "Inson aqlini taqlid qiluvchi tizimlar. Machine Learning, Deep Learning, Neural Networks.",
    ),
    (
        "Machine Learning",
        "Ma'lumotlardan o'rganuvchi algoritmlar. TensorFlow, PyTorch, scikit-learn.",
    ),
    (
        "Veb dasturlash",
        "Frontend (HTML, CSS, JS) va Backend (Python, PHP, Node.js)",
    ),
    (
        "Kiberxavfsizlik",
        "Tizimlarni himoya qilish. Ethical Hacking, Encryption, Security protocols.",
    ),
    (
        "DevOps",
        "Development va Operations. CI/CD, Docker, Kubernetes, Cloud services.",
    ),
];

/// `(month, day)` -> event.
pub const HISTORY: [((u32, u32), &str); 9] = [
    ((2, 15), "1946 - ENIAC kompyuteri taqdim etildi"),
    ((3, 2), "1983 - Compact Disc (CD) taqdim etildi"),
    ((4, 4), "1975 - Microsoft kompaniyasi tashkil etildi"),
    ((5, 15), "1990 - WorldWideWeb (WWW) taqdim etildi"),
    ((6, 5), "2007 - iPhone birinchi marta sotuvga chiqdi"),
    ((9, 4), "1998 - Google kompaniyasi tashkil etildi"),
    ((10, 1), "1982 - Sony birinchi CD player chiqardi"),
    ((11, 10), "1983 - Microsoft Windows taqdim etildi"),
    ((12, 17), "1903 - Wright brothers birinchi parvoz"),
];

pub const IMAGE_ENDPOINT: &str = "https://source.unsplash.com/featured/";

/// Image category -> search query for [`IMAGE_ENDPOINT`].
pub const IMAGE_CATEGORIES: [(&str, &str); 3] = [
    ("code", "programming,coding"),
    ("tech", "technology,computer"),
    ("developer", "developer,workspace"),
];
